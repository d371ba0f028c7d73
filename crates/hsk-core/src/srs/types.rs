//! Review state and grade definitions

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Milliseconds in one day. Intervals are whole days, timestamps are Unix ms.
pub const DAY_MS: i64 = 86_400_000;

/// Recall quality reported for a card.
///
/// Binary know/don't-know interfaces only ever produce `Again` and `Good`
/// (see [`Grade::from_known`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    /// Not recalled; the card starts over.
    Again,
    /// Recalled with significant effort.
    Hard,
    /// Recalled.
    Good,
    /// Recalled instantly.
    Easy,
}

impl Grade {
    /// All grades, weakest first.
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    /// Map a binary "I knew it" answer onto the grade scale.
    pub fn from_known(known: bool) -> Self {
        if known {
            Grade::Good
        } else {
            Grade::Again
        }
    }

    /// Whether the card was recalled at all.
    pub fn is_success(&self) -> bool {
        !matches!(self, Grade::Again)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }
}

/// A grade name that is none of again/hard/good/easy, 1-4 or known/unknown
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grade '{0}'")]
pub struct ParseGradeError(pub String);

impl FromStr for Grade {
    type Err = ParseGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" | "unknown" | "1" => Ok(Self::Again),
            "hard" | "2" => Ok(Self::Hard),
            "good" | "known" | "3" => Ok(Self::Good),
            "easy" | "4" => Ok(Self::Easy),
            _ => Err(ParseGradeError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-word repetition state.
///
/// Created lazily the first time a word is graded and only ever replaced by
/// [`ReviewScheduler::calculate_next_review`](super::ReviewScheduler::calculate_next_review).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// Interval growth multiplier, never below 1.3
    pub ease_factor: f64,
    /// Days until the next review
    pub interval_days: u32,
    /// Consecutive successful reviews
    pub repetitions: u32,
    /// Next review time (Unix timestamp milliseconds)
    pub due_at: i64,
    /// Last review time (Unix timestamp milliseconds)
    #[serde(default)]
    pub last_reviewed_at: Option<i64>,
}

impl ReviewState {
    /// A never-reviewed state that is due immediately.
    pub fn new(initial_ease: f64, now_ms: i64) -> Self {
        Self {
            ease_factor: initial_ease,
            interval_days: 0,
            repetitions: 0,
            due_at: now_ms,
            last_reviewed_at: None,
        }
    }

    /// Returns true if the review time has passed.
    pub fn is_due(&self, now_ms: i64) -> bool {
        self.due_at <= now_ms
    }

    /// Returns true if this word has never been graded.
    pub fn is_new(&self) -> bool {
        self.last_reviewed_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_known() {
        assert_eq!(Grade::from_known(true), Grade::Good);
        assert_eq!(Grade::from_known(false), Grade::Again);
    }

    #[test]
    fn test_is_success() {
        assert!(!Grade::Again.is_success());
        assert!(Grade::Hard.is_success());
        assert!(Grade::Good.is_success());
        assert!(Grade::Easy.is_success());
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!("Good".parse::<Grade>(), Ok(Grade::Good));
        assert_eq!("unknown".parse::<Grade>(), Ok(Grade::Again));
        assert_eq!(" 4 ".parse::<Grade>(), Ok(Grade::Easy));
        assert_eq!(
            "maybe".parse::<Grade>(),
            Err(ParseGradeError("maybe".to_string()))
        );
        assert_eq!(
            ParseGradeError("maybe".to_string()).to_string(),
            "unknown grade 'maybe'"
        );
    }

    #[test]
    fn test_grade_serializes_lowercase() {
        let json = serde_json::to_string(&Grade::Easy).unwrap();
        assert_eq!(json, r#""easy""#);
    }

    #[test]
    fn test_is_due() {
        let state = ReviewState::new(2.5, 1_000);
        assert!(state.is_due(1_000));
        assert!(!state.is_due(999));
        assert!(state.is_new());
    }
}
