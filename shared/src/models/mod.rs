//! Data models
//!
//! Shared between the reservation server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod dining_table;
pub mod reservation;
pub mod user;
pub mod zone;

// Re-exports
pub use dining_table::*;
pub use reservation::*;
pub use user::*;
pub use zone::*;
