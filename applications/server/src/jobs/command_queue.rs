/// Per-box command processing
///
/// API handlers enqueue decoded [`Command`]s and return immediately. A
/// dispatcher task routes each command to a lane task owned by its box, so
/// commands for one box run strictly in submission order while different
/// boxes proceed in parallel.
use crate::error::{Result, ServerError};
use crate::services::{Notifier, PlaylistService};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use watchbox_core::types::{BoxId, Command};

const LANE_CAPACITY: usize = 256;
const RETRY_BACKOFF: Duration = Duration::from_millis(200);
const LANE_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Executes a single command against the playlist service and fans the
/// outcome out through the notifier.
pub struct CommandProcessor {
    playlist: Arc<PlaylistService>,
    notifier: Arc<dyn Notifier>,
}

impl CommandProcessor {
    pub fn new(playlist: Arc<PlaylistService>, notifier: Arc<dyn Notifier>) -> Self {
        Self { playlist, notifier }
    }

    pub async fn process(&self, command: &Command) -> Result<()> {
        match command {
            Command::AddVideo(request) => {
                let (message, session) = self.playlist.on_video_submitted(request).await?;
                self.notifier.feedback(&message).await;
                self.notifier.queue_updated(&session).await;
            }
            Command::AddPlaylist(request) => {
                let (message, session) = self.playlist.on_playlist_submitted(request).await?;
                self.notifier.feedback(&message).await;
                self.notifier.queue_updated(&session).await;
            }
            Command::PlayNext(request) => {
                let (message, session) = self.playlist.on_play_next(request).await?;
                self.notifier.feedback(&message).await;
                self.notifier.queue_updated(&session).await;
            }
            Command::PlayNow(request) => {
                let (started, message, session) = self.playlist.on_play_now(request).await?;
                self.notifier.feedback(&message).await;
                self.notifier.queue_updated(&session).await;
                self.notifier
                    .now_playing(&request.box_token, Some(&started))
                    .await;
            }
            Command::Replay(request) => {
                let (started, message, session) = self.playlist.on_replay(request).await?;
                self.notifier.feedback(&message).await;
                self.notifier.queue_updated(&session).await;
                self.notifier
                    .now_playing(&request.box_token, Some(&started))
                    .await;
            }
            Command::SkipVideo(scope) => {
                let (next, session) = self.playlist.get_next_video(&scope.box_token).await?;
                self.notifier.queue_updated(&session).await;
                self.notifier
                    .now_playing(&scope.box_token, next.as_ref())
                    .await;
            }
            Command::RemoveVideo(request) => {
                let (message, session) = self.playlist.on_video_cancelled(request).await?;
                self.notifier.feedback(&message).await;
                self.notifier.queue_updated(&session).await;
            }
        }
        Ok(())
    }

    /// Run a command under its retry budget.
    ///
    /// Transient failures (storage, catalog) are retried with a short
    /// backoff until the budget runs out; terminal rejections are logged
    /// and dropped on the first hit.
    pub async fn run_with_retries(&self, command: &Command) {
        let budget = command.attempts();
        for attempt in 1..=budget {
            match self.process(command).await {
                Ok(()) => return,
                Err(error) if error.is_transient() && attempt < budget => {
                    tracing::warn!(
                        kind = command.kind(),
                        scope = %command.box_token(),
                        attempt,
                        budget,
                        %error,
                        "command failed, retrying"
                    );
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(error) => {
                    tracing::error!(
                        kind = command.kind(),
                        scope = %command.box_token(),
                        attempt,
                        %error,
                        "command dropped"
                    );
                    return;
                }
            }
        }
    }
}

/// Handle used by API handlers to enqueue commands.
#[derive(Clone)]
pub struct CommandQueue {
    tx: mpsc::Sender<Command>,
}

impl CommandQueue {
    /// Spawn the dispatcher and return the enqueue handle.
    pub fn start(processor: CommandProcessor) -> Self {
        Self::with_idle_timeout(processor, LANE_IDLE_TIMEOUT)
    }

    /// Like [`CommandQueue::start`] with a custom lane idle timeout.
    pub fn with_idle_timeout(processor: CommandProcessor, idle: Duration) -> Self {
        let (tx, rx) = mpsc::channel(LANE_CAPACITY);
        tokio::spawn(dispatch(rx, Arc::new(processor), idle));
        Self { tx }
    }

    pub async fn submit(&self, command: Command) -> Result<()> {
        self.tx
            .send(command)
            .await
            .map_err(|_| ServerError::Internal("command queue is gone".into()))
    }
}

/// Routes commands to per-box lanes, creating lanes on first sight.
///
/// Lanes stop themselves after `idle` without traffic so long-lived
/// processes do not accumulate one task per box ever commanded; their
/// map entries are pruned here and a fresh lane is spawned on the next
/// command for that box. The respawn path also covers a lane timing out
/// between the prune and the send.
async fn dispatch(
    mut rx: mpsc::Receiver<Command>,
    processor: Arc<CommandProcessor>,
    idle: Duration,
) {
    let mut lanes: HashMap<BoxId, mpsc::Sender<Command>> = HashMap::new();

    while let Some(command) = rx.recv().await {
        lanes.retain(|_, lane| !lane.is_closed());

        let scope = command.box_token().clone();
        let delivery = {
            let lane = lanes
                .entry(scope.clone())
                .or_insert_with(|| spawn_lane(scope.clone(), processor.clone(), idle));
            lane.send(command).await
        };

        if let Err(mpsc::error::SendError(command)) = delivery {
            let fresh = spawn_lane(scope.clone(), processor.clone(), idle);
            if fresh.send(command).await.is_err() {
                tracing::error!(scope = %scope, "lane respawn failed, command lost");
            }
            lanes.insert(scope, fresh);
        }
    }
}

fn spawn_lane(
    scope: BoxId,
    processor: Arc<CommandProcessor>,
    idle: Duration,
) -> mpsc::Sender<Command> {
    let (tx, mut rx) = mpsc::channel::<Command>(LANE_CAPACITY);
    tokio::spawn(async move {
        loop {
            match tokio::time::timeout(idle, rx.recv()).await {
                Ok(Some(command)) => {
                    tracing::debug!(scope = %scope, kind = command.kind(), "processing command");
                    processor.run_with_retries(&command).await;
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::debug!(scope = %scope, "lane idle, stopping");
                    break;
                }
            }
        }
    });
    tx
}
