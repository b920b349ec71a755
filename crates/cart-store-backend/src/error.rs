//! Error types for the backend module.

use thiserror::Error;

/// Errors that can occur during backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Storage is disabled or otherwise unreachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the storage quota.
    #[error("quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// A lock guarding the storage was poisoned by a panic.
    #[error("lock poisoned: {0}")]
    Poisoned(String),
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;
