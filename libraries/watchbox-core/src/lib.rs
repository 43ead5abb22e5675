//! Watchbox Core
//!
//! Platform-agnostic domain types, the command contract, and error handling
//! for Watchbox.
//!
//! This crate defines:
//! - **Domain Types**: `BoxSession`, `QueueItem`, `Video`, `User`
//! - **Command Contract**: the tagged `Command` enum consumed by the
//!   server's queue action processor, with per-type retry budgets
//! - **Error Handling**: unified `WatchboxError` and `Result` types with the
//!   terminal/transient split the retry policy relies on
//!
//! # Example
//!
//! ```rust
//! use watchbox_core::types::{BoxId, QueueItem, UserId, Video};
//! use chrono::Utc;
//!
//! let video = Video::new("dQw4w9WgXcQ", "Some Video", "PT3M33S");
//! let item = QueueItem::submission(video, Some(UserId::new("user-1")), Utc::now());
//! assert!(item.is_upcoming());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Result, WatchboxError};
pub use types::{
    BoxId, BoxScope, BoxSession, Command, CreateBox, CreateVideo, FeedbackMessage, ItemState,
    MessageSource, PlayOptions, PlaylistId, PlaylistSubmissionRequest, QueueItem,
    QueueItemActionRequest, QueueItemId, User, UserId, UserPlaylist, Video, VideoId,
    VideoSubmissionRequest,
};
