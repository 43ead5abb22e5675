/// Feedback messages emitted to viewers
use crate::types::BoxId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origin of a feedback message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSource {
    /// System-generated feedback
    Bot,
    /// Relayed from a viewer
    User,
}

/// A message broadcast to the viewers of a box.
///
/// Every playlist mutation produces one of these; delivery is the
/// notification emitter's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    pub contents: String,
    pub source: MessageSource,
    /// The box this message belongs to
    pub scope: BoxId,
    pub time: DateTime<Utc>,
}

impl FeedbackMessage {
    /// Create a bot feedback message scoped to a box
    pub fn bot(scope: BoxId, contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            source: MessageSource::Bot,
            scope,
            time: Utc::now(),
        }
    }
}
