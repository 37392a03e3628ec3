//! Error types for filedepot.

use thiserror::Error;

/// Common error type for filedepot.
#[derive(Error, Debug)]
pub enum DepotError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// Key-value cache error.
    #[error("cache error: {0}")]
    Cache(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Identity or session failure.
    #[error("unauthorized")]
    Unauthorized,

    /// Invalid or missing user input. Carries the user-facing message.
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation, e.g. a duplicate registration.
    #[error("{0}")]
    Conflict(String),

    /// Resource absent, or hidden from the requester.
    #[error("not found")]
    NotFound,

    /// Content was requested for a folder.
    #[error("A folder doesn't have content")]
    FolderHasNoContent,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Password hashing error.
    #[error("password error: {0}")]
    Password(#[from] crate::auth::PasswordError),
}

impl From<sqlx::Error> for DepotError {
    fn from(e: sqlx::Error) -> Self {
        DepotError::Database(e.to_string())
    }
}

impl From<deadpool_redis::PoolError> for DepotError {
    fn from(e: deadpool_redis::PoolError) -> Self {
        DepotError::Cache(format!("could not get connection from pool: {e}"))
    }
}

impl From<deadpool_redis::redis::RedisError> for DepotError {
    fn from(e: deadpool_redis::redis::RedisError) -> Self {
        DepotError::Cache(e.to_string())
    }
}

/// Result type alias for filedepot operations.
pub type Result<T> = std::result::Result<T, DepotError>;
