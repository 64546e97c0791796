//! Shared types for the reservation server
//!
//! Data models and API payload types used by the server and its clients.
//! DB row types gate their `sqlx` derives behind the `db` feature so that
//! client-side consumers stay free of the database stack.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
