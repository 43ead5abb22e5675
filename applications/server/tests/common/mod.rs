/// Shared fixtures for server integration tests
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use watchbox_core::types::{
    BoxId, BoxSession, CreateBox, CreateVideo, FeedbackMessage, PlayOptions, QueueItem, User,
    UserId,
};
use watchbox_server::error::{Result, ServerError};
use watchbox_server::jobs::{CommandProcessor, CommandQueue};
use watchbox_server::services::{Notifier, PlaylistService, VideoResolver};
use watchbox_server::state::AppState;
use watchbox_storage::{boxes, users};

/// Resolver backed by a fixed link -> metadata table; unknown links are a
/// terminal not-found, just like the real catalog.
pub struct StaticResolver {
    catalog: HashMap<String, CreateVideo>,
}

impl StaticResolver {
    pub fn new() -> Self {
        let mut catalog = HashMap::new();
        for (link, name, duration) in [
            ("yt-1", "First video", "PT3M12S"),
            ("yt-2", "Second video", "PT4M1S"),
            ("yt-3", "Third video", "PT2M45S"),
        ] {
            catalog.insert(
                link.to_string(),
                CreateVideo {
                    link: link.to_string(),
                    name: name.to_string(),
                    duration: duration.to_string(),
                },
            );
        }
        Self { catalog }
    }
}

#[async_trait]
impl VideoResolver for StaticResolver {
    async fn resolve(&self, link: &str) -> Result<CreateVideo> {
        self.catalog
            .get(link)
            .cloned()
            .ok_or_else(|| ServerError::NotFound(format!("Video not found: {link}")))
    }
}

/// Resolver that fails transiently a fixed number of times before
/// succeeding; used to exercise retry accounting.
pub struct FlakyResolver {
    failures: AtomicU32,
    pub calls: AtomicU32,
}

impl FlakyResolver {
    pub fn failing(times: u32) -> Self {
        Self {
            failures: AtomicU32::new(times),
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl VideoResolver for FlakyResolver {
    async fn resolve(&self, link: &str) -> Result<CreateVideo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failures.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| {
            left.checked_sub(1)
        })
        .is_ok()
        {
            return Err(ServerError::Catalog("catalog unavailable".into()));
        }

        Ok(CreateVideo {
            link: link.to_string(),
            name: format!("Video {link}"),
            duration: "PT1M".to_string(),
        })
    }
}

/// Notifier that records what it was handed
#[derive(Default)]
pub struct RecordingNotifier {
    pub feedback: Mutex<Vec<FeedbackMessage>>,
    pub queue_updates: Mutex<Vec<usize>>,
    pub now_playing: Mutex<Vec<Option<String>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn feedback(&self, message: &FeedbackMessage) {
        self.feedback.lock().unwrap().push(message.clone());
    }

    async fn queue_updated(&self, session: &BoxSession) {
        self.queue_updates.lock().unwrap().push(session.playlist.len());
    }

    async fn now_playing(&self, _scope: &BoxId, item: Option<&QueueItem>) {
        self.now_playing
            .lock()
            .unwrap()
            .push(item.map(|item| item.video.name.clone()));
    }
}

pub async fn test_pool() -> sqlx::SqlitePool {
    watchbox_storage::create_test_pool()
        .await
        .expect("in-memory pool")
}

pub async fn seed_user(pool: &sqlx::SqlitePool, name: &str) -> UserId {
    let user = User::new(name);
    users::create(pool, &user).await.expect("create user");
    user.id
}

pub async fn seed_box(pool: &sqlx::SqlitePool, creator: &UserId, options: PlayOptions) -> BoxId {
    let session = boxes::create(
        pool,
        CreateBox {
            name: "Friday night".to_string(),
            creator: Some(creator.clone()),
            options,
        },
    )
    .await
    .expect("create box");
    session.id
}

pub fn playlist_service(pool: &sqlx::SqlitePool) -> Arc<PlaylistService> {
    Arc::new(PlaylistService::new(pool.clone(), Arc::new(StaticResolver::new())))
}

pub fn app_state(
    pool: sqlx::SqlitePool,
    playlist: Arc<PlaylistService>,
    notifier: Arc<dyn Notifier>,
) -> AppState {
    let processor = CommandProcessor::new(playlist.clone(), notifier);
    let commands = CommandQueue::start(processor);
    AppState::new(pool, playlist, commands)
}
