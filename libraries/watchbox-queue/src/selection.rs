//! Next-item selection policies
//!
//! Two policies over the upcoming pool: submission-order FIFO and uniform
//! random. The generator is passed in so random mode stays deterministic
//! under test.

use rand::Rng;
use watchbox_core::types::QueueItem;

/// Pick the index of the next item to start, or `None` when nothing is
/// upcoming.
pub fn next_index(items: &[QueueItem], random: bool, rng: &mut impl Rng) -> Option<usize> {
    if random {
        random_index(items, rng)
    } else {
        fifo_index(items)
    }
}

/// FIFO selection: the playlist is stored most-recent-first, so the earliest
/// submitted upcoming item is the one nearest the tail.
pub fn fifo_index(items: &[QueueItem]) -> Option<usize> {
    items.iter().rposition(QueueItem::is_upcoming)
}

/// Uniform selection among all upcoming items.
pub fn random_index(items: &[QueueItem], rng: &mut impl Rng) -> Option<usize> {
    let upcoming: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_upcoming())
        .map(|(i, _)| i)
        .collect();

    if upcoming.is_empty() {
        None
    } else {
        Some(upcoming[rng.gen_range(0..upcoming.len())])
    }
}
