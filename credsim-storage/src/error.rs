//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A record with the same natural key already exists.
    #[error("duplicate record: {0}")]
    Duplicate(String),
}
