//! In-memory storage backend
//!
//! A simple HashMap-based implementation for tests, the browser bridge
//! (which hands snapshots to the page for durable storage) and short-lived
//! processes.

use std::collections::HashMap;

use crate::srs::ReviewState;
use crate::stats::StatsSnapshot;
use crate::storage::error::StoreResult;
use crate::storage::traits::{ProgressSnapshot, ReviewStateStore, StatsStore};

/// In-memory progress store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reviews: HashMap<String, ReviewState>,
    stats: Option<StatsSnapshot>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            reviews: HashMap::new(),
            stats: None,
        }
    }

    /// Create a memory store seeded from exported progress.
    pub fn from_progress(progress: ProgressSnapshot) -> Self {
        Self {
            reviews: progress.reviews,
            stats: Some(progress.stats),
        }
    }

    /// Export everything held by the store.
    pub fn to_progress(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            reviews: self.reviews.clone(),
            stats: self.stats.clone().unwrap_or_default(),
        }
    }

    /// Get a reference to all review states (for testing).
    pub fn all(&self) -> &HashMap<String, ReviewState> {
        &self.reviews
    }
}

impl ReviewStateStore for MemoryStore {
    fn get(&self, item_id: &str) -> StoreResult<Option<ReviewState>> {
        Ok(self.reviews.get(item_id).cloned())
    }

    fn put(&mut self, item_id: &str, state: ReviewState) -> StoreResult<()> {
        self.reviews.insert(item_id.to_string(), state);
        Ok(())
    }

    fn ids(&self) -> StoreResult<Vec<String>> {
        let mut ids: Vec<String> = self.reviews.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.reviews.clear();
        Ok(())
    }
}

impl StatsStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<StatsSnapshot>> {
        Ok(self.stats.clone())
    }

    fn save(&mut self, stats: &StatsSnapshot) -> StoreResult<()> {
        self.stats = Some(stats.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_state(interval: u32) -> ReviewState {
        ReviewState {
            ease_factor: 2.5,
            interval_days: interval,
            repetitions: 1,
            due_at: 1704067200000,
            last_reviewed_at: Some(1703980800000),
        }
    }

    #[test]
    fn test_put_and_get() {
        let mut store = MemoryStore::new();
        store.put("hsk1-ai", test_state(1)).unwrap();

        let retrieved = store.get("hsk1-ai").unwrap();
        assert_eq!(retrieved, Some(test_state(1)));
        assert!(store.get("hsk1-ba").unwrap().is_none());
    }

    #[test]
    fn test_put_replaces() {
        let mut store = MemoryStore::new();
        store.put("hsk1-ai", test_state(1)).unwrap();
        store.put("hsk1-ai", test_state(3)).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.get("hsk1-ai").unwrap().unwrap().interval_days, 3);
    }

    #[test]
    fn test_ids_sorted_and_clear() {
        let mut store = MemoryStore::new();
        store.put("b", test_state(1)).unwrap();
        store.put("a", test_state(1)).unwrap();

        assert_eq!(store.ids().unwrap(), vec!["a", "b"]);

        store.clear().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_stats_save_and_load() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let stats = StatsSnapshot {
            total_studied: 3,
            correct_answers: 2,
            wrong_answers: 1,
            current_streak: 1,
            best_streak: 1,
        };
        store.save(&stats).unwrap();
        assert_eq!(store.load().unwrap(), Some(stats));
    }

    #[test]
    fn test_progress_export_import() {
        let mut store = MemoryStore::new();
        store.put("hsk1-ai", test_state(2)).unwrap();
        store
            .save(&StatsSnapshot {
                total_studied: 1,
                correct_answers: 1,
                current_streak: 1,
                best_streak: 1,
                ..Default::default()
            })
            .unwrap();

        let json = serde_json::to_string(&store.to_progress()).unwrap();
        let restored = MemoryStore::from_progress(serde_json::from_str(&json).unwrap());

        assert_eq!(restored.to_progress(), store.to_progress());
    }
}
