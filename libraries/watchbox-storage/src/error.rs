/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// Lookups return `Option`; a storage error always means the database
// itself failed, which is transient as far as the retry policy goes.
impl From<StorageError> for watchbox_core::WatchboxError {
    fn from(err: StorageError) -> Self {
        watchbox_core::WatchboxError::Storage(err.to_string())
    }
}
