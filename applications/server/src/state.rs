use crate::jobs::CommandQueue;
use crate::services::PlaylistService;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub playlist: Arc<PlaylistService>,
    pub commands: CommandQueue,
}

impl AppState {
    pub fn new(pool: SqlitePool, playlist: Arc<PlaylistService>, commands: CommandQueue) -> Self {
        Self {
            pool,
            playlist,
            commands,
        }
    }
}
