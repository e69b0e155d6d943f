//! Error types for the message store

use thiserror::Error;

/// Result type for message store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur when using the message store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database unreachable or authentication failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Connection pool issues
    #[error("Pool error: {0}")]
    Pool(String),

    /// SQL errors, constraint violations
    #[error("Database error: {0}")]
    Database(String),

    /// Invalid input data or malformed rows
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_error) = err.as_db_error() {
            return StoreError::Database(format!("{}: {}", db_error.code().code(), db_error.message()));
        }
        StoreError::Database(format!("{:?}", err))
    }
}

impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StoreError::Pool(err.to_string())
    }
}

impl From<deadpool_postgres::BuildError> for StoreError {
    fn from(err: deadpool_postgres::BuildError) -> Self {
        StoreError::Connection(err.to_string())
    }
}
