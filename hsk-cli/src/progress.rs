//! JSON progress file
//!
//! The whole learner progress lives in one small JSON document that is
//! rewritten after every change. Writes go to a sibling temp file first and
//! are renamed into place, so a crash never leaves a half-written file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use hsk::tracing::prefix;
use hsk_core::srs::ReviewState;
use hsk_core::stats::StatsSnapshot;
use hsk_core::storage::{ProgressSnapshot, ReviewStateStore, StatsStore, StoreError, StoreResult};

/// File-backed progress store
#[derive(Debug)]
pub struct ProgressFile {
    path: PathBuf,
    progress: ProgressSnapshot,
    has_stats: bool,
}

impl ProgressFile {
    /// Open a progress file, starting empty if it does not exist yet.
    ///
    /// An unreadable or corrupt file is an error rather than a fresh start,
    /// so existing progress is never overwritten by accident.
    pub fn open(path: impl Into<PathBuf>) -> hsk::Result<Self> {
        let path = path.into();
        if !path.exists() {
            info!("{} no progress at {}, starting fresh", prefix::STORE, path.display());
            return Ok(Self {
                path,
                progress: ProgressSnapshot::default(),
                has_stats: false,
            });
        }

        let text = fs::read_to_string(&path)?;
        let progress: ProgressSnapshot = serde_json::from_str(&text)?;
        info!(
            "{} loaded {} review states from {}",
            prefix::STORE,
            progress.reviews.len(),
            path.display()
        );
        Ok(Self {
            path,
            progress,
            has_stats: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn progress(&self) -> &ProgressSnapshot {
        &self.progress
    }

    fn flush(&self) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&self.progress)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, json)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|e| StoreError::Backend(format!("{}: {}", self.path.display(), e)))?;

        debug!("{} saved progress to {}", prefix::STORE, self.path.display());
        Ok(())
    }
}

impl ReviewStateStore for ProgressFile {
    fn get(&self, item_id: &str) -> StoreResult<Option<ReviewState>> {
        Ok(self.progress.reviews.get(item_id).cloned())
    }

    fn put(&mut self, item_id: &str, state: ReviewState) -> StoreResult<()> {
        self.progress.reviews.insert(item_id.to_string(), state);
        self.flush()
    }

    fn ids(&self) -> StoreResult<Vec<String>> {
        let mut ids: Vec<String> = self.progress.reviews.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.progress.reviews.clear();
        self.flush()
    }
}

impl StatsStore for ProgressFile {
    fn load(&self) -> StoreResult<Option<StatsSnapshot>> {
        if self.has_stats {
            Ok(Some(self.progress.stats.clone()))
        } else {
            Ok(None)
        }
    }

    fn save(&mut self, stats: &StatsSnapshot) -> StoreResult<()> {
        self.progress.stats = stats.clone();
        self.has_stats = true;
        self.flush()
    }
}
