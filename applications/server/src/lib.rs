//! Watchbox server
//!
//! HTTP API plus the per-box command pipeline behind it. Handlers decode
//! requests into typed commands; the command queue serializes them per box
//! and drives the playlist service, which runs the scheduling engine from
//! `watchbox-queue` over state persisted by `watchbox-storage`.

pub mod api;
pub mod config;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod services;
pub mod state;

pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;
