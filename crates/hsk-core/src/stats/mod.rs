//! Practice statistics
//!
//! Counters accumulate for the lifetime of a profile; only the current
//! streak ever goes back down, and only on a failed card.

use serde::{Deserialize, Serialize};

use crate::srs::Grade;

/// Point-in-time copy of the practice counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_studied: u64,
    pub correct_answers: u64,
    pub wrong_answers: u64,
    pub current_streak: u64,
    pub best_streak: u64,
}

impl StatsSnapshot {
    /// Share of correct answers as a percentage, 0 when nothing was studied.
    pub fn accuracy(&self) -> f64 {
        if self.total_studied == 0 {
            return 0.0;
        }
        self.correct_answers as f64 * 100.0 / self.total_studied as f64
    }
}

/// Accumulates grading events into a [`StatsSnapshot`]
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    stats: StatsSnapshot,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume counting from previously saved stats.
    pub fn from_snapshot(stats: StatsSnapshot) -> Self {
        Self { stats }
    }

    /// Count one graded card.
    pub fn record(&mut self, grade: Grade) {
        self.stats.total_studied += 1;
        if grade.is_success() {
            self.stats.correct_answers += 1;
            self.stats.current_streak += 1;
            self.stats.best_streak = self.stats.best_streak.max(self.stats.current_streak);
        } else {
            self.stats.wrong_answers += 1;
            self.stats.current_streak = 0;
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats.clone()
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        self.stats = StatsSnapshot::default();
    }
}
