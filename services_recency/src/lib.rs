//! # Recency Tracker
//!
//! Keeps the documents the user touched, most recent first.
//!
//! ## Philosophy
//!
//! - **Stack-based**: Touching a document moves it to the front of the stack
//! - **Deduplicated**: Each document appears at most once
//! - **Session-scoped**: Nothing is persisted; the stack lives as long as
//!   the process
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A history with back/forward navigation
//! - A list of open documents (closed-but-touched entries are pruned by the
//!   caller, and open-but-untouched documents never appear here)

use jump_types::DocumentId;
use std::collections::VecDeque;
use tracing::trace;

/// Most-recent-first stack of touched documents
#[derive(Debug, Clone, Default)]
pub struct RecencyTracker {
    /// Front of the deque is the most recently touched document
    stack: VecDeque<DocumentId>,
}

impl RecencyTracker {
    pub fn new() -> Self {
        Self {
            stack: VecDeque::new(),
        }
    }

    /// Records a touch: moves `id` to the front, removing any earlier entry
    pub fn push(&mut self, id: DocumentId) {
        if self.stack.front() == Some(&id) {
            return;
        }
        self.remove(&id);
        trace!(document = %id, "recency push");
        self.stack.push_front(id);
    }

    /// Forgets a document; no-op if it was never touched
    pub fn remove(&mut self, id: &DocumentId) {
        self.stack.retain(|entry| entry != id);
    }

    /// Keeps only the entries for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&DocumentId) -> bool) {
        self.stack.retain(|entry| keep(entry));
    }

    /// Returns the most recently touched document
    pub fn front(&self) -> Option<&DocumentId> {
        self.stack.front()
    }

    /// Returns the position of `id` in the stack (front = rank 0)
    pub fn rank(&self, id: &DocumentId) -> Option<usize> {
        self.stack.iter().position(|entry| entry == id)
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.rank(id).is_some()
    }

    /// Iterates from most to least recent
    pub fn iter(&self) -> impl Iterator<Item = &DocumentId> {
        self.stack.iter()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(tracker: &RecencyTracker) -> Vec<&str> {
        tracker.iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_new_tracker_is_empty() {
        let tracker = RecencyTracker::new();
        assert!(tracker.is_empty());
        assert!(tracker.front().is_none());
    }

    #[test]
    fn test_push_places_most_recent_first() {
        let mut tracker = RecencyTracker::new();
        tracker.push("A".into());
        tracker.push("B".into());
        tracker.push("C".into());

        assert_eq!(ids(&tracker), vec!["C", "B", "A"]);
        assert_eq!(tracker.front(), Some(&DocumentId::from("C")));
    }

    #[test]
    fn test_push_existing_moves_to_front_without_duplicating() {
        let mut tracker = RecencyTracker::new();
        tracker.push("A".into());
        tracker.push("B".into());
        tracker.push("C".into());
        tracker.push("A".into());

        assert_eq!(ids(&tracker), vec!["A", "C", "B"]);
        assert_eq!(tracker.len(), 3);
    }

    #[test]
    fn test_push_front_is_noop() {
        let mut tracker = RecencyTracker::new();
        tracker.push("A".into());
        tracker.push("B".into());
        tracker.push("B".into());

        assert_eq!(ids(&tracker), vec!["B", "A"]);
    }

    #[test]
    fn test_push_keeps_relative_order_of_others() {
        let mut tracker = RecencyTracker::new();
        for id in ["A", "B", "C", "D"] {
            tracker.push(id.into());
        }
        tracker.push("B".into());

        assert_eq!(ids(&tracker), vec!["B", "D", "C", "A"]);
    }

    #[test]
    fn test_remove() {
        let mut tracker = RecencyTracker::new();
        tracker.push("A".into());
        tracker.push("B".into());

        tracker.remove(&"A".into());
        assert_eq!(ids(&tracker), vec!["B"]);

        tracker.remove(&"Z".into());
        assert_eq!(ids(&tracker), vec!["B"]);
    }

    #[test]
    fn test_rank() {
        let mut tracker = RecencyTracker::new();
        tracker.push("A".into());
        tracker.push("B".into());

        assert_eq!(tracker.rank(&"B".into()), Some(0));
        assert_eq!(tracker.rank(&"A".into()), Some(1));
        assert_eq!(tracker.rank(&"C".into()), None);
    }

    #[test]
    fn test_retain() {
        let mut tracker = RecencyTracker::new();
        for id in ["A", "B", "C"] {
            tracker.push(id.into());
        }
        tracker.retain(|id| id.as_str() != "B");

        assert_eq!(ids(&tracker), vec!["C", "A"]);
    }

    #[test]
    fn test_any_push_sequence_keeps_entries_unique() {
        let mut tracker = RecencyTracker::new();
        let sequence = ["A", "B", "A", "C", "C", "B", "D", "A", "D"];
        for id in sequence {
            tracker.push(id.into());
            assert_eq!(tracker.front().map(|f| f.as_str()), Some(id));

            let all = ids(&tracker);
            for (i, entry) in all.iter().enumerate() {
                assert!(!all[i + 1..].contains(entry), "duplicate {entry}");
            }
        }
        assert_eq!(ids(&tracker), vec!["D", "A", "B", "C"]);
    }
}
