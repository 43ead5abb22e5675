/// User catalog playlists
use crate::types::{PlaylistId, UserId, Video};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved, named list of videos owned by a user.
///
/// Submitting one to a box expands every video into a fresh queue item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPlaylist {
    #[serde(rename = "_id")]
    pub id: PlaylistId,
    pub name: String,
    pub owner: Option<UserId>,
    pub videos: Vec<Video>,
    pub created_at: DateTime<Utc>,
}

impl UserPlaylist {
    /// Create an empty playlist
    pub fn new(name: impl Into<String>, owner: Option<UserId>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            owner,
            videos: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
