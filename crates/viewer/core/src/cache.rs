//! Recently presented snapshots, for cheap back-and-forth scrubbing.

use std::collections::VecDeque;
use std::sync::Arc;

use replay_core::Snapshot;

/// Least-recently-used cache keyed by turn index.
///
/// Entries go stale when the store grows, because a row with an earlier
/// date shifts later turn indices; the session clears the cache then.
#[derive(Debug)]
pub struct FrameCache {
    entries: VecDeque<(u64, Arc<Snapshot>)>,
    capacity: usize,
}

impl FrameCache {
    /// A capacity of zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn get(&mut self, turn: u64) -> Option<Arc<Snapshot>> {
        let index = self.entries.iter().position(|(t, _)| *t == turn)?;
        let entry = self.entries.remove(index)?;
        let snapshot = Arc::clone(&entry.1);
        self.entries.push_back(entry);
        Some(snapshot)
    }

    pub fn insert(&mut self, snapshot: Arc<Snapshot>) {
        if self.capacity == 0 {
            return;
        }
        let turn = snapshot.turn;
        self.entries.retain(|(t, _)| *t != turn);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((turn, snapshot));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(turn: u64) -> Arc<Snapshot> {
        Arc::new(Snapshot::new(turn))
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = FrameCache::new(2);
        cache.insert(frame(0));
        cache.insert(frame(1));
        assert!(cache.get(0).is_some());
        cache.insert(frame(2));

        assert!(cache.get(1).is_none());
        assert!(cache.get(0).is_some());
        assert!(cache.get(2).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reinserting_replaces_entry() {
        let mut cache = FrameCache::new(4);
        cache.insert(frame(3));
        cache.insert(frame(3));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = FrameCache::new(0);
        cache.insert(frame(1));
        assert!(cache.is_empty());
        assert!(cache.get(1).is_none());
    }
}
