/// Playlist queue item and its lifecycle
use crate::types::{QueueItemId, UserId, Video};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a queue item, derived from its timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    /// Not started yet (`start_time` unset)
    Upcoming,
    /// Started but not finished (`start_time` set, `end_time` unset)
    Playing,
    /// Finished (`end_time` set)
    Played,
}

/// One scheduled play of a video by a submitter.
///
/// A box playlist holds these most-recent-submission-first. At most one item
/// per box may be in the `Playing` state at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    #[serde(rename = "_id")]
    pub id: QueueItemId,
    pub video: Video,
    pub submitted_at: DateTime<Utc>,
    pub submitted_by: Option<UserId>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Reserved for a future skip-without-play policy
    pub ignored: bool,
}

impl QueueItem {
    /// Create a fresh upcoming submission for a video
    pub fn submission(video: Video, submitted_by: Option<UserId>, at: DateTime<Utc>) -> Self {
        Self {
            id: QueueItemId::generate(),
            video,
            submitted_at: at,
            submitted_by,
            start_time: None,
            end_time: None,
            ignored: false,
        }
    }

    pub fn state(&self) -> ItemState {
        if self.end_time.is_some() {
            ItemState::Played
        } else if self.start_time.is_some() {
            ItemState::Playing
        } else {
            ItemState::Upcoming
        }
    }

    pub fn is_upcoming(&self) -> bool {
        self.state() == ItemState::Upcoming
    }

    pub fn is_playing(&self) -> bool {
        self.state() == ItemState::Playing
    }

    pub fn is_played(&self) -> bool {
        self.state() == ItemState::Played
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Video;
    use chrono::Utc;

    fn item() -> QueueItem {
        QueueItem::submission(Video::new("yt1", "First", "PT3M0S"), None, Utc::now())
    }

    #[test]
    fn states_follow_timestamps() {
        let mut it = item();
        assert_eq!(it.state(), ItemState::Upcoming);

        it.start_time = Some(Utc::now());
        assert_eq!(it.state(), ItemState::Playing);
        assert!(it.is_playing());

        it.end_time = Some(Utc::now());
        assert_eq!(it.state(), ItemState::Played);
        assert!(!it.is_playing());
    }
}
