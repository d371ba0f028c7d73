//! SM-2 style review scheduler
//!
//! Computes the next [`ReviewState`] for a word from its current state and
//! the grade the learner gave. The calculation is pure: storing the result
//! is the caller's job.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use super::types::{Grade, ReviewState, DAY_MS};

/// Lowest ease factor any state can reach.
pub const MIN_EASE: f64 = 1.3;

/// Invalid scheduler parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial ease {initial} must lie within [1.3, {max}]")]
    InitialEaseOutOfRange { initial: f64, max: f64 },

    #[error("maximum ease {0} must be at least 1.3")]
    MaxEaseTooLow(f64),

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("easy bonus {0} must be at least 1.0")]
    EasyBonusTooLow(f64),

    #[error("maximum interval must be at least one day")]
    MaxIntervalTooLow,
}

/// Tunable scheduling parameters.
///
/// There is no authoritative source for these numbers; the defaults follow
/// the classic SM-2 shape and every value can be overridden from config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Ease factor given to a word on its first review (default: 2.5)
    pub initial_ease: f64,
    /// Ceiling for the ease factor (default: 3.0)
    pub max_ease: f64,
    /// Ease change applied on `Again` (default: -0.20)
    pub again_ease_delta: f64,
    /// Ease change applied on `Hard` (default: -0.15)
    pub hard_ease_delta: f64,
    /// Ease change applied on `Good` (default: 0.0)
    pub good_ease_delta: f64,
    /// Ease change applied on `Easy` (default: +0.15)
    pub easy_ease_delta: f64,
    /// Interval growth multiplier on `Hard` (default: 0.8)
    pub hard_interval_modifier: f64,
    /// Extra interval growth multiplier on `Easy` (default: 1.3)
    pub easy_bonus: f64,
    /// Interval ceiling in days (default: 36500)
    pub max_interval_days: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            max_ease: 3.0,
            again_ease_delta: -0.20,
            hard_ease_delta: -0.15,
            good_ease_delta: 0.0,
            easy_ease_delta: 0.15,
            hard_interval_modifier: 0.8,
            easy_bonus: 1.3,
            max_interval_days: 36_500,
        }
    }
}

impl SchedulerConfig {
    /// Check that the parameters keep every state within its bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ease < MIN_EASE {
            return Err(ConfigError::MaxEaseTooLow(self.max_ease));
        }
        if self.initial_ease < MIN_EASE || self.initial_ease > self.max_ease {
            return Err(ConfigError::InitialEaseOutOfRange {
                initial: self.initial_ease,
                max: self.max_ease,
            });
        }
        if self.hard_interval_modifier <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "hard interval modifier",
                value: self.hard_interval_modifier,
            });
        }
        if self.easy_bonus < 1.0 {
            return Err(ConfigError::EasyBonusTooLow(self.easy_bonus));
        }
        if self.max_interval_days < 1 {
            return Err(ConfigError::MaxIntervalTooLow);
        }
        Ok(())
    }

    fn ease_delta(&self, grade: Grade) -> f64 {
        match grade {
            Grade::Again => self.again_ease_delta,
            Grade::Hard => self.hard_ease_delta,
            Grade::Good => self.good_ease_delta,
            Grade::Easy => self.easy_ease_delta,
        }
    }

    fn interval_modifier(&self, grade: Grade) -> f64 {
        match grade {
            Grade::Hard => self.hard_interval_modifier,
            Grade::Easy => self.easy_bonus,
            Grade::Again | Grade::Good => 1.0,
        }
    }
}

/// Spaced-repetition scheduler
#[derive(Debug, Clone, Default)]
pub struct ReviewScheduler {
    config: SchedulerConfig,
}

impl ReviewScheduler {
    /// Create a scheduler with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with validated custom parameters
    pub fn with_config(config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The state a word has before its first review.
    pub fn initial_state(&self, now_ms: i64) -> ReviewState {
        ReviewState::new(self.config.initial_ease, now_ms)
    }

    /// Compute the state that follows grading a word at `now_ms`.
    ///
    /// `state` is `None` for a word that has never been reviewed.
    pub fn calculate_next_review(
        &self,
        state: Option<&ReviewState>,
        grade: Grade,
        now_ms: i64,
    ) -> ReviewState {
        let current = match state {
            Some(s) => s.clone(),
            None => self.initial_state(now_ms),
        };

        let ease_factor = self.clamp_ease(current.ease_factor + self.config.ease_delta(grade));

        let (repetitions, interval_days) = match grade {
            Grade::Again => (0, 1),
            _ => {
                let interval = if current.repetitions == 0 || current.interval_days == 0 {
                    // A single data point never earns more than one day
                    1
                } else {
                    let prev = current.interval_days;
                    let grown = (f64::from(prev) * ease_factor * self.config.interval_modifier(grade))
                        .round();
                    let grown = if grown >= f64::from(u32::MAX) {
                        u32::MAX
                    } else {
                        grown as u32
                    };
                    grown.max(prev.saturating_add(1))
                };
                (
                    current.repetitions.saturating_add(1),
                    interval.min(self.config.max_interval_days),
                )
            }
        };

        trace!(
            grade = %grade,
            repetitions,
            interval_days,
            ease_factor,
            "scheduled next review"
        );

        ReviewState {
            ease_factor,
            interval_days,
            repetitions,
            due_at: now_ms.saturating_add(i64::from(interval_days).saturating_mul(DAY_MS)),
            last_reviewed_at: Some(now_ms),
        }
    }

    fn clamp_ease(&self, ease: f64) -> f64 {
        if ease.is_nan() {
            return self.config.initial_ease;
        }
        ease.clamp(MIN_EASE, self.config.max_ease)
    }
}
