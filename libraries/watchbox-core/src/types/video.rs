/// Video catalog entry
use crate::types::VideoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A video known to the catalog.
///
/// Created once when first submitted; immutable afterwards except for
/// re-resolution against the external catalog. The duration is kept in the
/// catalog's ISO-8601 form (e.g. `PT4M13S`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    /// External catalog identifier (e.g. the YouTube video id)
    pub link: String,
    pub name: String,
    pub duration: String,
    pub created_at: DateTime<Utc>,
}

impl Video {
    /// Create a new video record for a catalog link
    pub fn new(link: impl Into<String>, name: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            id: VideoId::generate(),
            link: link.into(),
            name: name.into(),
            duration: duration.into(),
            created_at: Utc::now(),
        }
    }
}

/// Payload for storing a new video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVideo {
    pub link: String,
    pub name: String,
    pub duration: String,
}
