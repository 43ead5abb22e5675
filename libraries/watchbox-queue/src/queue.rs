//! Box playlist snapshot and the advance algorithm
//!
//! `BoxQueue` wraps one loaded playlist snapshot. Mutations happen in
//! memory; the caller persists the result with a single atomic replace.
//! Nothing here performs I/O, so the whole transition is testable without a
//! store.

use crate::error::{QueueError, Result};
use crate::{regen, selection};
use chrono::{DateTime, Utc};
use rand::Rng;
use watchbox_core::types::{PlayOptions, QueueItem, QueueItemId};

/// One box playlist plus its mode flags.
///
/// Stored order is most-recent-submission-first; read front-to-back the
/// playlist is upcoming items, then the playing item, then history. The
/// advance algorithm preserves that reading regardless of which selection
/// policy produced the next item.
#[derive(Debug, Clone)]
pub struct BoxQueue {
    items: Vec<QueueItem>,
    options: PlayOptions,
}

impl BoxQueue {
    /// Wrap a loaded playlist snapshot
    pub fn new(items: Vec<QueueItem>, options: PlayOptions) -> Self {
        Self { items, options }
    }

    /// Consume the snapshot for persistence
    pub fn into_items(self) -> Vec<QueueItem> {
        self.items
    }

    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    pub fn options(&self) -> PlayOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The currently playing item, if any
    pub fn current(&self) -> Option<&QueueItem> {
        self.items.iter().find(|item| item.is_playing())
    }

    /// Number of items still waiting to play
    pub fn upcoming_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_upcoming()).count()
    }

    /// Insert a fresh submission at the head of the playlist
    pub fn push_submission(&mut self, item: QueueItem) {
        self.items.insert(0, item);
    }

    /// Index of the unique playing item.
    ///
    /// More than one playing item is a data-integrity fault, not a state we
    /// ever write ourselves.
    fn playing_index(&self) -> Result<Option<usize>> {
        let mut found = None;
        let mut count = 0;

        for (i, item) in self.items.iter().enumerate() {
            if item.is_playing() {
                count += 1;
                found.get_or_insert(i);
            }
        }

        if count > 1 {
            return Err(QueueError::MultiplePlaying(count));
        }
        Ok(found)
    }

    fn index_of(&self, item_id: &QueueItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| &item.id == item_id)
            .ok_or_else(|| QueueError::ItemNotFound(item_id.clone()))
    }

    /// Close the playing item at the transition timestamp, if one exists
    fn close_current(&mut self, at: DateTime<Utc>) -> Result<Option<usize>> {
        let playing = self.playing_index()?;
        if let Some(i) = playing {
            self.items[i].end_time = Some(at);
        }
        Ok(playing)
    }

    /// Stamp `start_time` on the item at `index` and reposition it so the
    /// playlist keeps reading upcoming -> playing -> history.
    ///
    /// The started item lands immediately before the first played item,
    /// i.e. adjacent to whatever just finished.
    fn start_item(&mut self, index: usize, at: DateTime<Utc>) -> QueueItem {
        self.items[index].start_time = Some(at);

        let item = self.items.remove(index);
        let boundary = self
            .items
            .iter()
            .position(QueueItem::is_played)
            .unwrap_or(self.items.len());
        self.items.insert(boundary, item);

        self.items[boundary].clone()
    }

    /// Advance the playlist to its next item.
    ///
    /// Runs the full transition with one timestamp `at`: close the playing
    /// item, regenerate from history when loop mode is on and nothing
    /// upcoming remains, select the next item (uniform random or submission
    /// FIFO), start and reposition it. Returns the started item, or `None`
    /// when there is nothing left to play.
    pub fn advance(&mut self, at: DateTime<Utc>, rng: &mut impl Rng) -> Result<Option<QueueItem>> {
        self.close_current(at)?;

        if self.upcoming_count() == 0 && self.options.loop_mode {
            self.items = regen::regenerate(&self.items, at);
        }

        let Some(next) = selection::next_index(&self.items, self.options.random, rng) else {
            return Ok(None);
        };

        Ok(Some(self.start_item(next, at)))
    }

    /// Advance with an explicit target instead of running selection.
    ///
    /// The close-out half of the advance algorithm still applies; the target
    /// must be upcoming once the playing item is closed.
    pub fn advance_to(&mut self, item_id: &QueueItemId, at: DateTime<Utc>) -> Result<QueueItem> {
        self.close_current(at)?;

        let index = self.index_of(item_id)?;
        if !self.items[index].is_upcoming() {
            return Err(QueueError::NotUpcoming(item_id.clone()));
        }

        Ok(self.start_item(index, at))
    }

    /// Move an upcoming item into the next-to-play slot.
    ///
    /// Under FIFO selection the next advance will pick it; random mode
    /// ignores order, so this is a no-op in effect there. The current item
    /// keeps playing.
    pub fn promote(&mut self, item_id: &QueueItemId) -> Result<()> {
        let index = self.index_of(item_id)?;
        if !self.items[index].is_upcoming() {
            return Err(QueueError::NotUpcoming(item_id.clone()));
        }

        let item = self.items.remove(index);
        let boundary = self
            .items
            .iter()
            .position(|it| !it.is_upcoming())
            .unwrap_or(self.items.len());
        self.items.insert(boundary, item);

        Ok(())
    }

    /// Return a played item to the upcoming pool.
    ///
    /// Clears both timestamps; the item keeps its position until the forced
    /// advance that follows repositions it.
    pub fn requeue(&mut self, item_id: &QueueItemId) -> Result<()> {
        let index = self.index_of(item_id)?;
        if !self.items[index].is_played() {
            return Err(QueueError::NotPlayed(item_id.clone()));
        }

        self.items[index].start_time = None;
        self.items[index].end_time = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use watchbox_core::types::Video;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    fn options(loop_mode: bool, random: bool) -> PlayOptions {
        PlayOptions { loop_mode, random }
    }

    /// Submissions in call order; storage is most-recent-first
    fn queue_of(links: &[&str], opts: PlayOptions) -> BoxQueue {
        let mut queue = BoxQueue::new(Vec::new(), opts);
        for link in links {
            queue.push_submission(QueueItem::submission(
                Video::new(*link, *link, "PT3M0S"),
                None,
                Utc::now(),
            ));
        }
        queue
    }

    #[test]
    fn advance_on_empty_playlist_is_a_no_op() {
        let mut queue = queue_of(&[], options(false, false));
        let next = queue.advance(Utc::now(), &mut rng()).unwrap();
        assert!(next.is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn first_advance_starts_without_closing() {
        let mut queue = queue_of(&["yt1"], options(false, false));

        let t1 = Utc::now();
        let next = queue.advance(t1, &mut rng()).unwrap().unwrap();

        assert_eq!(next.video.link, "yt1");
        assert_eq!(next.start_time, Some(t1));
        assert!(next.end_time.is_none());
        assert!(queue.items().iter().all(|i| !i.is_played()));
    }

    #[test]
    fn sequential_mode_plays_in_submission_order() {
        let mut queue = queue_of(&["v1", "v2", "v3"], options(false, false));

        let first = queue.advance(Utc::now(), &mut rng()).unwrap().unwrap();
        assert_eq!(first.video.link, "v1");
        let second = queue.advance(Utc::now(), &mut rng()).unwrap().unwrap();
        assert_eq!(second.video.link, "v2");
        let third = queue.advance(Utc::now(), &mut rng()).unwrap().unwrap();
        assert_eq!(third.video.link, "v3");

        let fourth = queue.advance(Utc::now(), &mut rng()).unwrap();
        assert!(fourth.is_none());
    }

    #[test]
    fn advance_closes_the_previous_item() {
        let mut queue = queue_of(&["v1", "v2"], options(false, false));

        queue.advance(Utc::now(), &mut rng()).unwrap();
        let t2 = Utc::now();
        queue.advance(t2, &mut rng()).unwrap();

        let closed = queue
            .items()
            .iter()
            .find(|i| i.video.link == "v1")
            .unwrap();
        assert_eq!(closed.end_time, Some(t2));

        let playing = queue.current().unwrap();
        assert_eq!(playing.video.link, "v2");
        assert_eq!(playing.start_time, Some(t2));
    }

    #[test]
    fn at_most_one_item_plays_at_any_time() {
        let mut queue = queue_of(&["v1", "v2", "v3", "v4"], options(false, true));
        let mut rng = rng();

        for _ in 0..4 {
            queue.advance(Utc::now(), &mut rng).unwrap();
            let playing = queue.items().iter().filter(|i| i.is_playing()).count();
            assert!(playing <= 1);
        }
    }

    #[test]
    fn two_playing_items_is_an_integrity_fault() {
        let mut queue = queue_of(&["v1", "v2"], options(false, false));
        // Forge a corrupt snapshot
        for item in &mut queue.items {
            item.start_time = Some(Utc::now());
        }

        let err = queue.advance(Utc::now(), &mut rng()).unwrap_err();
        assert!(matches!(err, QueueError::MultiplePlaying(2)));
    }

    #[test]
    fn playlist_reads_future_playing_history() {
        let mut queue = queue_of(&["v1", "v2", "v3"], options(false, false));
        let mut rng = rng();

        queue.advance(Utc::now(), &mut rng).unwrap(); // v1 playing
        queue.advance(Utc::now(), &mut rng).unwrap(); // v2 playing, v1 played

        let states: Vec<_> = queue.items().iter().map(|i| i.state()).collect();
        let boundary_playing = states
            .iter()
            .position(|s| *s == watchbox_core::ItemState::Playing)
            .unwrap();
        // Everything before the playing item is upcoming, everything after is history
        assert!(states[..boundary_playing]
            .iter()
            .all(|s| *s == watchbox_core::ItemState::Upcoming));
        assert!(states[boundary_playing + 1..]
            .iter()
            .all(|s| *s == watchbox_core::ItemState::Played));
    }

    #[test]
    fn loop_mode_regenerates_exhausted_playlist() {
        let mut queue = queue_of(&["v1", "v2"], options(true, false));
        let mut rng = rng();

        queue.advance(Utc::now(), &mut rng).unwrap(); // v1
        queue.advance(Utc::now(), &mut rng).unwrap(); // v2

        // Playlist exhausted; loop mode rebuilds it and keeps playing
        let next = queue.advance(Utc::now(), &mut rng).unwrap().unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.upcoming_count(), 1);
        assert!(queue.items().iter().any(|i| i.id == next.id));
    }

    #[test]
    fn without_loop_an_exhausted_playlist_stays_exhausted() {
        let mut queue = queue_of(&["v1"], options(false, false));
        let mut rng = rng();

        queue.advance(Utc::now(), &mut rng).unwrap();
        let next = queue.advance(Utc::now(), &mut rng).unwrap();
        assert!(next.is_none());
        assert_eq!(queue.upcoming_count(), 0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn advance_to_overrides_selection() {
        let mut queue = queue_of(&["v1", "v2", "v3"], options(false, false));
        let target = queue
            .items()
            .iter()
            .find(|i| i.video.link == "v3")
            .unwrap()
            .id
            .clone();

        let started = queue.advance_to(&target, Utc::now()).unwrap();
        assert_eq!(started.video.link, "v3");
        assert_eq!(queue.current().unwrap().id, started.id);
    }

    #[test]
    fn advance_to_closes_the_previous_item_first() {
        let mut queue = queue_of(&["v1", "v2"], options(false, false));
        let mut rng = rng();
        queue.advance(Utc::now(), &mut rng).unwrap(); // v1 playing

        let target = queue
            .items()
            .iter()
            .find(|i| i.video.link == "v2")
            .unwrap()
            .id
            .clone();
        let t = Utc::now();
        queue.advance_to(&target, t).unwrap();

        let v1 = queue.items().iter().find(|i| i.video.link == "v1").unwrap();
        assert_eq!(v1.end_time, Some(t));
    }

    #[test]
    fn advance_to_rejects_played_targets() {
        let mut queue = queue_of(&["v1", "v2"], options(false, false));
        let mut rng = rng();
        queue.advance(Utc::now(), &mut rng).unwrap();
        queue.advance(Utc::now(), &mut rng).unwrap();

        let played = queue
            .items()
            .iter()
            .find(|i| i.video.link == "v1")
            .unwrap()
            .id
            .clone();
        let err = queue.advance_to(&played, Utc::now()).unwrap_err();
        assert!(matches!(err, QueueError::NotUpcoming(_)));
    }

    #[test]
    fn advance_to_unknown_item_fails() {
        let mut queue = queue_of(&["v1"], options(false, false));
        let err = queue
            .advance_to(&QueueItemId::new("missing"), Utc::now())
            .unwrap_err();
        assert!(matches!(err, QueueError::ItemNotFound(_)));
    }

    #[test]
    fn promote_makes_an_item_next_in_line() {
        let mut queue = queue_of(&["v1", "v2", "v3"], options(false, false));
        let mut rng = rng();
        queue.advance(Utc::now(), &mut rng).unwrap(); // v1 playing

        let v3 = queue
            .items()
            .iter()
            .find(|i| i.video.link == "v3")
            .unwrap()
            .id
            .clone();
        queue.promote(&v3).unwrap();

        let next = queue.advance(Utc::now(), &mut rng).unwrap().unwrap();
        assert_eq!(next.video.link, "v3");
    }

    #[test]
    fn requeue_returns_a_played_item_to_upcoming() {
        let mut queue = queue_of(&["v1", "v2"], options(false, false));
        let mut rng = rng();
        queue.advance(Utc::now(), &mut rng).unwrap();
        queue.advance(Utc::now(), &mut rng).unwrap(); // v1 played

        let v1 = queue
            .items()
            .iter()
            .find(|i| i.video.link == "v1")
            .unwrap()
            .id
            .clone();
        queue.requeue(&v1).unwrap();

        let item = queue.items().iter().find(|i| i.id == v1).unwrap();
        assert!(item.is_upcoming());
        assert_eq!(queue.upcoming_count(), 1);
    }

    #[test]
    fn requeue_rejects_upcoming_items() {
        let mut queue = queue_of(&["v1"], options(false, false));
        let id = queue.items()[0].id.clone();
        let err = queue.requeue(&id).unwrap_err();
        assert!(matches!(err, QueueError::NotPlayed(_)));
    }
}
