//! Watchbox Storage
//!
//! `SQLite` persistence layer for Watchbox.
//!
//! This crate holds the Playlist Store: per-box open flag, mode options and
//! the ordered queue-item sequence, plus the independently addressable video
//! and user records.
//!
//! # Architecture
//!
//! - **Vertical slicing**: each entity owns its own query module
//!   (`boxes`, `queue`, `videos`, `users`, `playlists`)
//! - **Snapshot writes**: `queue::replace` swaps a box's whole sequence in
//!   one transaction; the command processor's per-box serialization is what
//!   makes the read-modify-write around it safe
//! - **Stored order**: a `position` column preserves the engine's exact
//!   ordering (upcoming -> playing -> history), which submission timestamps
//!   alone cannot reconstruct
//!
//! # Example
//!
//! ```rust,no_run
//! use watchbox_storage::{create_pool, run_migrations, boxes};
//! use watchbox_core::types::{BoxId, CreateBox, PlayOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://watchbox.db").await?;
//! run_migrations(&pool).await?;
//!
//! let snapshot = boxes::get_by_id(&pool, &BoxId::new("box-1")).await?;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod boxes;
pub mod playlists;
pub mod queue;
pub mod users;
pub mod videos;

pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into the binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Called once at startup so the schema is up to date before any query runs.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// `database_url` is a `SQLite` connection string (e.g. `sqlite://watchbox.db`).
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create an in-memory pool with migrations applied (for tests)
///
/// Capped at one connection: every connection to `sqlite::memory:` gets its
/// own database, so a larger pool would scatter state.
pub async fn create_test_pool() -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}
