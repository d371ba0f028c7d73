//! Storage trait definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::srs::ReviewState;
use crate::stats::StatsSnapshot;
use crate::storage::error::StoreResult;

/// Per-word review state storage.
///
/// The practice core reads states when a session is built and writes one
/// word at a time after each grade. Backends decide how durable a write is;
/// callers treat failures as non-fatal.
pub trait ReviewStateStore {
    /// Retrieve the review state of a word.
    ///
    /// Returns `None` if the word has never been reviewed.
    fn get(&self, item_id: &str) -> StoreResult<Option<ReviewState>>;

    /// Insert or replace the review state of a word.
    fn put(&mut self, item_id: &str, state: ReviewState) -> StoreResult<()>;

    /// Get all word IDs that have a review state.
    fn ids(&self) -> StoreResult<Vec<String>>;

    /// Get the number of reviewed words.
    fn count(&self) -> StoreResult<usize> {
        Ok(self.ids()?.len())
    }

    /// Remove every review state.
    fn clear(&mut self) -> StoreResult<()>;
}

/// Persistence for aggregated practice statistics.
pub trait StatsStore {
    /// Load saved stats, `None` if nothing was saved yet.
    fn load(&self) -> StoreResult<Option<StatsSnapshot>>;

    /// Replace the saved stats.
    fn save(&mut self, stats: &StatsSnapshot) -> StoreResult<()>;
}

/// A backend that keeps both review states and statistics.
pub trait ProgressStore: ReviewStateStore + StatsStore {}

impl<T: ReviewStateStore + StatsStore + ?Sized> ProgressStore for T {}

/// Portable copy of a learner's full progress.
///
/// This is the import/export format shared by the JSON progress file and
/// the browser bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSnapshot {
    pub reviews: HashMap<String, ReviewState>,
    pub stats: StatsSnapshot,
}
