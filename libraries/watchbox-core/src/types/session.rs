/// Box session type
use crate::types::{BoxId, QueueItem, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playback mode flags for a box.
///
/// `loop_mode` regenerates the playlist from history once nothing upcoming
/// remains; `random` selects uniformly among upcoming items instead of
/// submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOptions {
    #[serde(rename = "loop")]
    pub loop_mode: bool,
    pub random: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            loop_mode: false,
            random: false,
        }
    }
}

/// A session coordinating one shared playlist for multiple viewers.
///
/// The playlist is ordered most-recent-submission-first; read front-to-back
/// it is future items, then the currently playing item, then history. Once
/// `open` is false no playlist mutation is permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxSession {
    #[serde(rename = "_id")]
    pub id: BoxId,
    pub name: String,
    pub creator: Option<UserId>,
    pub open: bool,
    pub options: PlayOptions,
    pub playlist: Vec<QueueItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a box
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBox {
    pub name: String,
    pub creator: Option<UserId>,
    #[serde(default)]
    pub options: PlayOptions,
}
