/// Playlist service - every mutation of a box's queue goes through here
///
/// Each operation loads one snapshot, runs the scheduling engine on it and
/// persists the result with a single atomic replace. The command processor
/// serializes calls per box, which is what makes that read-modify-write
/// safe.
use crate::error::Result;
use crate::services::VideoResolver;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use watchbox_core::types::{
    BoxId, BoxSession, FeedbackMessage, PlaylistSubmissionRequest, QueueItem,
    QueueItemActionRequest, UserId, Video, VideoSubmissionRequest,
};
use watchbox_core::WatchboxError;
use watchbox_queue::BoxQueue;
use watchbox_storage::{boxes, playlists, queue, users, videos};

pub struct PlaylistService {
    pool: SqlitePool,
    resolver: Arc<dyn VideoResolver>,
}

impl PlaylistService {
    pub fn new(pool: SqlitePool, resolver: Arc<dyn VideoResolver>) -> Self {
        Self { pool, resolver }
    }

    /// Add a submitted video to the playlist of a box.
    ///
    /// Resolves the video against the catalog (creating the record on first
    /// sight), inserts a fresh upcoming item at the head of the sequence
    /// and returns feedback naming the submitter.
    pub async fn on_video_submitted(
        &self,
        request: &VideoSubmissionRequest,
    ) -> Result<(FeedbackMessage, BoxSession)> {
        if request.link.trim().is_empty() {
            return Err(WatchboxError::InvalidInput("no video link given".into()).into());
        }

        let video = self.resolve_video(&request.link).await?;
        let submitter = self.display_name(&request.user_token).await?;

        let session = self.load_open_box(&request.box_token).await?;
        let mut playlist = BoxQueue::new(session.playlist, session.options);
        playlist.push_submission(QueueItem::submission(
            video.clone(),
            Some(request.user_token.clone()),
            Utc::now(),
        ));

        let updated = self
            .persist(&request.box_token, playlist.into_items())
            .await?;

        let contents = match submitter {
            Some(name) => format!("{name} has added the video \"{}\" to the playlist.", video.name),
            None => format!("The video \"{}\" has been added to the playlist.", video.name),
        };

        Ok((FeedbackMessage::bot(request.box_token.clone(), contents), updated))
    }

    /// Expand a saved catalog playlist into the box queue.
    ///
    /// Items are inserted at the head so that FIFO selection plays them in
    /// playlist order after everything already waiting.
    pub async fn on_playlist_submitted(
        &self,
        request: &PlaylistSubmissionRequest,
    ) -> Result<(FeedbackMessage, BoxSession)> {
        let saved = playlists::get_with_videos(&self.pool, &request.playlist_id)
            .await?
            .ok_or_else(|| WatchboxError::PlaylistNotFound(request.playlist_id.clone()))?;

        let submitter = self.display_name(&request.user_token).await?;
        let session = self.load_open_box(&request.box_token).await?;

        let now = Utc::now();
        let mut playlist = BoxQueue::new(session.playlist, session.options);
        for video in &saved.videos {
            playlist.push_submission(QueueItem::submission(
                video.clone(),
                Some(request.user_token.clone()),
                now,
            ));
        }

        let updated = self
            .persist(&request.box_token, playlist.into_items())
            .await?;

        let count = saved.videos.len();
        let contents = match submitter {
            Some(name) => format!(
                "{name} has added the playlist \"{}\" ({count} videos) to the queue.",
                saved.name
            ),
            None => format!(
                "The playlist \"{}\" ({count} videos) has been added to the queue.",
                saved.name
            ),
        };

        Ok((FeedbackMessage::bot(request.box_token.clone(), contents), updated))
    }

    /// Remove one submission from the playlist, whatever its state.
    ///
    /// Removing the playing item leaves the box with nothing playing until
    /// the next advance; nothing is auto-selected here.
    pub async fn on_video_cancelled(
        &self,
        request: &QueueItemActionRequest,
    ) -> Result<(FeedbackMessage, BoxSession)> {
        let actor = self.display_name(&request.user_token).await?;
        let session = self.load_open_box(&request.box_token).await?;

        let removed = queue::remove_item(&self.pool, &session.id, &request.item).await?;
        if !removed {
            return Err(WatchboxError::ItemNotFound(request.item.clone()).into());
        }

        let updated = self.reload(&request.box_token).await?;

        let contents = match actor {
            Some(name) => format!("{name} has removed a submission from the playlist."),
            None => "A submission has been removed from the playlist.".to_string(),
        };

        Ok((FeedbackMessage::bot(request.box_token.clone(), contents), updated))
    }

    /// The currently playing item of a box
    pub async fn get_current_video(&self, box_id: &BoxId) -> Result<Option<QueueItem>> {
        let session = self.load_box(box_id).await?;
        if !session.open {
            return Err(WatchboxError::BoxClosed(box_id.clone()).into());
        }

        Ok(queue::current_item(&self.pool, box_id).await?)
    }

    /// Advance the playlist: close whatever plays, pick the next item under
    /// the box's mode flags, persist, and hand back the started item.
    pub async fn get_next_video(
        &self,
        box_id: &BoxId,
    ) -> Result<(Option<QueueItem>, BoxSession)> {
        let session = self.load_open_box(box_id).await?;

        let mut playlist = BoxQueue::new(session.playlist, session.options);
        let next = playlist.advance(Utc::now(), &mut rand::thread_rng())?;

        let updated = self.persist(box_id, playlist.into_items()).await?;
        Ok((next, updated))
    }

    /// Move an upcoming item into the next-to-play slot
    pub async fn on_play_next(
        &self,
        request: &QueueItemActionRequest,
    ) -> Result<(FeedbackMessage, BoxSession)> {
        let actor = self.display_name(&request.user_token).await?;
        let session = self.load_open_box(&request.box_token).await?;

        let mut playlist = BoxQueue::new(session.playlist, session.options);
        playlist.promote(&request.item)?;

        let updated = self
            .persist(&request.box_token, playlist.into_items())
            .await?;

        let contents = match actor {
            Some(name) => format!("{name} has moved a video up the queue."),
            None => "A video has been moved up the queue.".to_string(),
        };

        Ok((FeedbackMessage::bot(request.box_token.clone(), contents), updated))
    }

    /// Close the playing item and force-start the given one immediately
    pub async fn on_play_now(
        &self,
        request: &QueueItemActionRequest,
    ) -> Result<(QueueItem, FeedbackMessage, BoxSession)> {
        let actor = self.display_name(&request.user_token).await?;
        let session = self.load_open_box(&request.box_token).await?;

        let mut playlist = BoxQueue::new(session.playlist, session.options);
        let started = playlist.advance_to(&request.item, Utc::now())?;

        let updated = self
            .persist(&request.box_token, playlist.into_items())
            .await?;

        let contents = match actor {
            Some(name) => format!("{name} has skipped straight to \"{}\".", started.video.name),
            None => format!("Now playing \"{}\".", started.video.name),
        };

        Ok((
            started,
            FeedbackMessage::bot(request.box_token.clone(), contents),
            updated,
        ))
    }

    /// Bring a played item back from history and start it immediately
    pub async fn on_replay(
        &self,
        request: &QueueItemActionRequest,
    ) -> Result<(QueueItem, FeedbackMessage, BoxSession)> {
        let actor = self.display_name(&request.user_token).await?;
        let session = self.load_open_box(&request.box_token).await?;

        let mut playlist = BoxQueue::new(session.playlist, session.options);
        playlist.requeue(&request.item)?;
        let started = playlist.advance_to(&request.item, Utc::now())?;

        let updated = self
            .persist(&request.box_token, playlist.into_items())
            .await?;

        let contents = match actor {
            Some(name) => format!("{name} has replayed \"{}\".", started.video.name),
            None => format!("Replaying \"{}\".", started.video.name),
        };

        Ok((
            started,
            FeedbackMessage::bot(request.box_token.clone(), contents),
            updated,
        ))
    }

    /// Get a video from the database, resolving it against the external
    /// catalog when it is not known yet.
    async fn resolve_video(&self, link: &str) -> Result<Video> {
        if let Some(video) = videos::get_by_link(&self.pool, link).await? {
            return Ok(video);
        }

        let metadata = self.resolver.resolve(link).await?;
        Ok(videos::create(&self.pool, metadata).await?)
    }

    async fn display_name(&self, user_token: &UserId) -> Result<Option<String>> {
        Ok(users::get_by_id(&self.pool, user_token)
            .await?
            .map(|user| user.name))
    }

    async fn load_box(&self, box_id: &BoxId) -> Result<BoxSession> {
        boxes::get_by_id(&self.pool, box_id)
            .await?
            .ok_or_else(|| WatchboxError::BoxNotFound(box_id.clone()).into())
    }

    async fn load_open_box(&self, box_id: &BoxId) -> Result<BoxSession> {
        let session = self.load_box(box_id).await?;
        if !session.open {
            return Err(WatchboxError::BoxClosed(box_id.clone()).into());
        }
        Ok(session)
    }

    async fn persist(&self, box_id: &BoxId, items: Vec<QueueItem>) -> Result<BoxSession> {
        queue::replace(&self.pool, box_id, &items).await?;
        self.reload(box_id).await
    }

    async fn reload(&self, box_id: &BoxId) -> Result<BoxSession> {
        self.load_box(box_id).await
    }
}
