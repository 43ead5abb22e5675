/// Command contract for the queue action processor
use crate::types::{BoxId, PlaylistId, QueueItemId, UserId};
use serde::{Deserialize, Serialize};

/// Request to add a single video to a box playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSubmissionRequest {
    pub box_token: BoxId,
    pub user_token: UserId,
    pub link: String,
}

/// Request to expand a user catalog playlist into a box playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSubmissionRequest {
    pub box_token: BoxId,
    pub user_token: UserId,
    pub playlist_id: PlaylistId,
}

/// Request acting on one existing queue item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItemActionRequest {
    pub box_token: BoxId,
    pub user_token: UserId,
    pub item: QueueItemId,
}

/// Request scoped to a box with no further target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScope {
    pub box_token: BoxId,
    pub user_token: UserId,
}

/// A queued request to mutate a box's playlist.
///
/// Decoded once at ingestion; each variant carries exactly the fields its
/// handler needs. Wire shape is `{ "type": ..., "requestContents": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "requestContents", rename_all = "camelCase")]
pub enum Command {
    AddVideo(VideoSubmissionRequest),
    AddPlaylist(PlaylistSubmissionRequest),
    PlayNext(QueueItemActionRequest),
    PlayNow(QueueItemActionRequest),
    Replay(QueueItemActionRequest),
    SkipVideo(BoxScope),
    RemoveVideo(QueueItemActionRequest),
}

impl Command {
    /// Transport retry budget for this command type.
    ///
    /// Only transient failures consume attempts; terminal rejections drop
    /// the command immediately.
    pub fn attempts(&self) -> u32 {
        match self {
            Command::AddVideo(_) | Command::AddPlaylist(_) => 10,
            Command::PlayNext(_)
            | Command::PlayNow(_)
            | Command::Replay(_)
            | Command::RemoveVideo(_) => 5,
            Command::SkipVideo(_) => 3,
        }
    }

    /// The box this command mutates; commands sharing a box are serialized
    pub fn box_token(&self) -> &BoxId {
        match self {
            Command::AddVideo(r) => &r.box_token,
            Command::AddPlaylist(r) => &r.box_token,
            Command::PlayNext(r)
            | Command::PlayNow(r)
            | Command::Replay(r)
            | Command::RemoveVideo(r) => &r.box_token,
            Command::SkipVideo(r) => &r.box_token,
        }
    }

    /// The acting user
    pub fn user_token(&self) -> &UserId {
        match self {
            Command::AddVideo(r) => &r.user_token,
            Command::AddPlaylist(r) => &r.user_token,
            Command::PlayNext(r)
            | Command::PlayNow(r)
            | Command::Replay(r)
            | Command::RemoveVideo(r) => &r.user_token,
            Command::SkipVideo(r) => &r.user_token,
        }
    }

    /// Stable label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Command::AddVideo(_) => "addVideo",
            Command::AddPlaylist(_) => "addPlaylist",
            Command::PlayNext(_) => "playNext",
            Command::PlayNow(_) => "playNow",
            Command::Replay(_) => "replay",
            Command::SkipVideo(_) => "skipVideo",
            Command::RemoveVideo(_) => "removeVideo",
        }
    }
}
