//! Session building
//!
//! Filters the vocabulary pool by level and due date, then shuffles it once
//! into a [`SessionQueue`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, warn};

use super::queue::SessionQueue;
use super::types::{SessionConfig, SessionMode};
use crate::storage::ReviewStateStore;
use crate::vocabulary::VocabularyItem;

/// Outcome of building a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionBuild {
    Ready(SessionQueue),
    /// The filters matched no words
    Empty,
}

impl SessionBuild {
    pub fn is_empty(&self) -> bool {
        matches!(self, SessionBuild::Empty)
    }

    pub fn into_queue(self) -> Option<SessionQueue> {
        match self {
            SessionBuild::Ready(queue) => Some(queue),
            SessionBuild::Empty => None,
        }
    }
}

/// Builds shuffled practice queues
#[derive(Debug)]
pub struct SessionSequencer {
    rng: StdRng,
}

impl Default for SessionSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSequencer {
    /// Create a sequencer with an entropy-seeded shuffle
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a sequencer with a reproducible shuffle
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build a queue from `pool`.
    ///
    /// In [`SessionMode::DueOnly`] a word is kept when it has no review state
    /// or its review time has passed. A state that cannot be read counts as
    /// due, so storage trouble never hides words.
    pub fn build_session<S>(
        &mut self,
        pool: &[VocabularyItem],
        states: &S,
        config: &SessionConfig,
        now_ms: i64,
    ) -> SessionBuild
    where
        S: ReviewStateStore + ?Sized,
    {
        if let Some(seed) = config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        let mut items: Vec<VocabularyItem> = pool
            .iter()
            .filter(|item| config.level.matches(item.hsk_level))
            .filter(|item| match config.mode {
                SessionMode::All => true,
                SessionMode::DueOnly => is_due(states, item, now_ms),
            })
            .cloned()
            .collect();

        items.shuffle(&mut self.rng);

        if let Some(limit) = config.limit {
            items.truncate(limit);
        }

        debug!(
            pool = pool.len(),
            selected = items.len(),
            mode = ?config.mode,
            level = %config.level,
            "built session"
        );

        if items.is_empty() {
            return SessionBuild::Empty;
        }

        SessionBuild::Ready(SessionQueue::new(items, config.end_policy))
    }
}

fn is_due<S>(states: &S, item: &VocabularyItem, now_ms: i64) -> bool
where
    S: ReviewStateStore + ?Sized,
{
    match states.get(&item.id) {
        Ok(Some(state)) => state.is_due(now_ms),
        Ok(None) => true,
        Err(e) => {
            warn!(id = %item.id, error = %e, "review state unavailable, treating as due");
            true
        }
    }
}
