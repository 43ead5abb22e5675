//! Loop-mode playlist regeneration
//!
//! Once nothing upcoming remains and loop mode is on, the whole playlist is
//! resubmitted: one fresh upcoming item per video ever seen, in encounter
//! order, deduplicated by video identity.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use watchbox_core::types::QueueItem;

/// Rebuild a playlist from its full history.
///
/// Every item (played or not) contributes one fresh upcoming entry for its
/// video, stamped `at`. Duplicate videos keep the first occurrence
/// encountered, including its submitter. All prior timeline state is
/// discarded.
pub fn regenerate(items: &[QueueItem], at: DateTime<Utc>) -> Vec<QueueItem> {
    let mut seen = HashSet::new();

    items
        .iter()
        .filter(|item| seen.insert(item.video.id.clone()))
        .map(|item| QueueItem::submission(item.video.clone(), item.submitted_by.clone(), at))
        .collect()
}
