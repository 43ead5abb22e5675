//! Error types for the scheduling engine

use thiserror::Error;
use watchbox_core::types::QueueItemId;
use watchbox_core::WatchboxError;

/// Scheduling errors
#[derive(Debug, Error)]
pub enum QueueError {
    /// No item with this id in the playlist
    #[error("Queue item not found: {0}")]
    ItemNotFound(QueueItemId),

    /// Data-integrity fault: more than one item has started without ending
    #[error("Invariant violation: {0} items playing at once")]
    MultiplePlaying(usize),

    /// The targeted item is not in the upcoming pool
    #[error("Queue item is not upcoming: {0}")]
    NotUpcoming(QueueItemId),

    /// The targeted item has not been played yet
    #[error("Queue item has not been played: {0}")]
    NotPlayed(QueueItemId),
}

impl From<QueueError> for WatchboxError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::ItemNotFound(id) => WatchboxError::ItemNotFound(id),
            QueueError::MultiplePlaying(n) => {
                WatchboxError::InconsistentQueue(format!("{n} items playing at once"))
            }
            QueueError::NotUpcoming(id) => {
                WatchboxError::InvalidInput(format!("item {id} is not upcoming"))
            }
            // A replay target outside history is indistinguishable from a
            // missing one as far as the caller is concerned
            QueueError::NotPlayed(id) => WatchboxError::ItemNotFound(id),
        }
    }
}

/// Result type for scheduling operations
pub type Result<T> = std::result::Result<T, QueueError>;
