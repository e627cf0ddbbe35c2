//! Playback history
//!
//! A bounded, most-recent-first list of played tracks backing the
//! "previous" button. Recording a track moves it to the front and removes
//! any prior occurrence of the same id, so the history holds each song at
//! most once. The persisted slice is a truncation of the in-memory list,
//! not a separate store.

use crate::types::Track;
use std::collections::VecDeque;

/// Most-recently-played list, bounded and de-duplicated by track id
#[derive(Debug, Clone)]
pub struct History {
    /// History buffer (most recent = front)
    tracks: VecDeque<Track>,

    /// In-memory capacity
    limit: usize,

    /// Capacity of the persisted slice
    persisted_limit: usize,
}

impl History {
    /// Create an empty history with the given capacities
    pub fn new(limit: usize, persisted_limit: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(limit),
            limit,
            persisted_limit,
        }
    }

    /// Restore history from a persisted snapshot (most recent first)
    pub fn restore(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks.into_iter().collect();
        self.tracks.truncate(self.limit);
    }

    /// Record a freshly played track
    ///
    /// Any prior occurrence of the same id is removed before the track is
    /// placed at the front; the list is then truncated to capacity.
    pub fn record(&mut self, track: Track) {
        self.tracks.retain(|t| t.id != track.id);
        self.tracks.push_front(track);
        self.tracks.truncate(self.limit);
    }

    /// Remove and return the most recent entry
    ///
    /// Backs "previous track" when the queue is empty: this models "go
    /// back", not "repeat".
    pub fn consume_front(&mut self) -> Option<Track> {
        self.tracks.pop_front()
    }

    /// Most recent entry without removing it
    pub fn peek_front(&self) -> Option<&Track> {
        self.tracks.front()
    }

    /// Entry at `index` (0 = most recent)
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All entries, most recent first
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// The slice that goes to storage (first `persisted_limit` entries)
    pub fn persisted_slice(&self) -> Vec<Track> {
        self.tracks
            .iter()
            .take(self.persisted_limit)
            .cloned()
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn create_test_track(id: &str, title: &str) -> Track {
        Track {
            id: id.to_string(),
            title: title.to_string(),
            duration: Duration::from_secs(180),
            genre: None,
            artist: "Test Artist".to_string(),
            album: "Test Album".to_string(),
            cover: "cover.png".to_string(),
        }
    }

    #[test]
    fn record_puts_most_recent_first() {
        let mut history = History::new(50, 20);
        history.record(create_test_track("1", "Track 1"));
        history.record(create_test_track("2", "Track 2"));

        assert_eq!(history.peek_front().unwrap().id, "2");
        assert_eq!(history.get(1).unwrap().id, "1");
    }

    #[test]
    fn record_deduplicates_by_id() {
        let mut history = History::new(50, 20);
        history.record(create_test_track("1", "Track 1"));
        history.record(create_test_track("2", "Track 2"));
        history.record(create_test_track("1", "Track 1"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.peek_front().unwrap().id, "1");
        assert_eq!(history.get(1).unwrap().id, "2");
    }

    #[test]
    fn record_truncates_to_capacity() {
        let mut history = History::new(3, 2);
        for i in 1..=5 {
            history.record(create_test_track(&i.to_string(), &format!("Track {}", i)));
        }

        assert_eq!(history.len(), 3);
        let ids: Vec<&str> = history.tracks().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "4", "3"]);
    }

    #[test]
    fn consume_front_removes_most_recent() {
        let mut history = History::new(50, 20);
        history.record(create_test_track("1", "Track 1"));
        history.record(create_test_track("2", "Track 2"));

        assert_eq!(history.consume_front().unwrap().id, "2");
        assert_eq!(history.len(), 1);
        assert_eq!(history.consume_front().unwrap().id, "1");
        assert!(history.consume_front().is_none());
    }

    #[test]
    fn persisted_slice_is_truncation_of_memory() {
        let mut history = History::new(50, 2);
        history.record(create_test_track("1", "Track 1"));
        history.record(create_test_track("2", "Track 2"));
        history.record(create_test_track("3", "Track 3"));

        assert_eq!(history.len(), 3);
        let slice = history.persisted_slice();
        assert_eq!(slice.len(), 2);
        assert_eq!(slice[0].id, "3");
        assert_eq!(slice[1].id, "2");
    }

    #[test]
    fn restore_truncates_to_capacity() {
        let mut history = History::new(2, 2);
        history.restore(vec![
            create_test_track("1", "Track 1"),
            create_test_track("2", "Track 2"),
            create_test_track("3", "Track 3"),
        ]);

        assert_eq!(history.len(), 2);
        assert_eq!(history.peek_front().unwrap().id, "1");
    }

    #[test]
    fn clear_history() {
        let mut history = History::new(50, 20);
        history.record(create_test_track("1", "Track 1"));
        history.clear();
        assert!(history.is_empty());
    }
}
