//! Watchbox - Playlist Scheduling Engine
//!
//! Pure decision logic for advancing a shared box playlist.
//!
//! This crate provides:
//! - `BoxQueue`: one playlist snapshot plus mode flags, mutated in memory
//! - The advance algorithm: close the playing item, loop-mode regeneration,
//!   next-item selection (FIFO or uniform random), position-preserving
//!   reordering
//! - Forced-target transitions for play-now and replay
//!
//! # Architecture
//!
//! `watchbox-queue` is completely I/O-free: no database, no network, no
//! clock. Callers load a snapshot from the store, hand it to `BoxQueue`
//! with a transition timestamp and a random generator, and persist the
//! result with one atomic replace. Serializing mutations per box is the
//! caller's job; it is what makes the read-modify-write here safe.
//!
//! # Example
//!
//! ```rust
//! use watchbox_queue::BoxQueue;
//! use watchbox_core::types::{PlayOptions, QueueItem, Video};
//! use chrono::Utc;
//!
//! let video = Video::new("dQw4w9WgXcQ", "Some Video", "PT3M33S");
//! let item = QueueItem::submission(video, None, Utc::now());
//!
//! let mut queue = BoxQueue::new(vec![item], PlayOptions::default());
//! let next = queue.advance(Utc::now(), &mut rand::thread_rng()).unwrap();
//! assert!(next.is_some());
//! ```

#![forbid(unsafe_code)]

mod error;
mod queue;
mod regen;
mod selection;

// Public exports
pub use error::{QueueError, Result};
pub use queue::BoxQueue;
pub use regen::regenerate;
pub use selection::{fifo_index, next_index, random_index};
