//! Repository Module
//!
//! CRUD operations over the SQLite tables as free functions taking the pool.
//! The transactional booking path lives in [`crate::reservations`], not here.

// Auth
pub mod user;

// Location
pub mod dining_table;
pub mod zone;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
