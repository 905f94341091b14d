//! Error types for the booking store

use slotbook_common::error::SchedulingError;
use thiserror::Error;

/// Errors that can occur when working with the database
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// A stored row could not be turned into a model
    #[error("Invalid stored row: {0}")]
    MappingError(String),
}

impl From<DbError> for SchedulingError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConfigError(msg) => SchedulingError::ConfigError(msg),
            other => SchedulingError::StorageError(other.to_string()),
        }
    }
}
