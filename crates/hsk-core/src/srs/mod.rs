//! Spaced-repetition scheduling
//!
//! A conventional SM-2 style scheduler. Each graded review produces a new
//! [`ReviewState`]; repeated failures shrink the ease factor (never below
//! [`MIN_EASE`]) and successes grow the interval multiplicatively.
//!
//! # Example
//!
//! ```rust
//! use hsk_core::srs::{Grade, ReviewScheduler};
//!
//! let scheduler = ReviewScheduler::new();
//! let now = 1_704_067_200_000;
//!
//! let state = scheduler.calculate_next_review(None, Grade::Good, now);
//! assert_eq!(state.repetitions, 1);
//! assert_eq!(state.interval_days, 1);
//! ```

mod scheduler;
mod types;

pub use scheduler::{ConfigError, ReviewScheduler, SchedulerConfig, MIN_EASE};
pub use types::{Grade, ParseGradeError, ReviewState, DAY_MS};
