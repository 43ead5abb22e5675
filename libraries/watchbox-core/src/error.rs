/// Core error types for Watchbox
use crate::types::{BoxId, PlaylistId, QueueItemId};
use thiserror::Error;

/// Result type alias using `WatchboxError`
pub type Result<T> = std::result::Result<T, WatchboxError>;

/// Core error type for Watchbox.
///
/// The taxonomy matters for the command processor: terminal failures
/// (validation, not-found, state conflicts) are rejected immediately and
/// never retried, while transient failures consume the command's retry
/// budget. `is_transient` encodes that split.
#[derive(Error, Debug)]
pub enum WatchboxError {
    /// Box not found
    #[error("Box not found: {0}")]
    BoxNotFound(BoxId),

    /// Video not found in the catalog
    #[error("Video not found: {0}")]
    VideoNotFound(String),

    /// Queue item not found in the box playlist
    #[error("Queue item not found: {0}")]
    ItemNotFound(QueueItemId),

    /// Catalog playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Mutation attempted on a closed box
    #[error("Box {0} is closed. The playlist cannot be modified")]
    BoxClosed(BoxId),

    /// Playlist state violates an invariant (e.g. two items playing)
    #[error("Inconsistent queue state: {0}")]
    InconsistentQueue(String),

    /// Missing or malformed request fields
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Persistence layer failure (retryable)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Video resolution collaborator failure (retryable)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// I/O error (retryable)
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl WatchboxError {
    /// Whether retrying this failure can ever succeed.
    ///
    /// Deterministic rejections must not consume a command's retry budget.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            WatchboxError::Storage(_) | WatchboxError::Catalog(_) | WatchboxError::Io(_)
        )
    }
}
