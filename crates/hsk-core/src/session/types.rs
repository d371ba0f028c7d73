//! Session configuration types

use serde::{Deserialize, Serialize};

/// Which words a session draws from the filtered pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionMode {
    /// Every word matching the level filter
    #[default]
    All,
    /// Only words whose review is due; unseen words are always due
    DueOnly,
}

/// HSK level restriction. Serialized as `null` (all levels) or a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<u8>", into = "Option<u8>")]
pub enum LevelFilter {
    #[default]
    All,
    Level(u8),
}

impl LevelFilter {
    pub fn matches(&self, hsk_level: u8) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Level(level) => *level == hsk_level,
        }
    }
}

impl From<Option<u8>> for LevelFilter {
    fn from(level: Option<u8>) -> Self {
        match level {
            Some(level) => LevelFilter::Level(level),
            None => LevelFilter::All,
        }
    }
}

impl From<LevelFilter> for Option<u8> {
    fn from(filter: LevelFilter) -> Self {
        match filter {
            LevelFilter::All => None,
            LevelFilter::Level(level) => Some(level),
        }
    }
}

impl std::fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all levels"),
            Self::Level(level) => write!(f, "HSK {}", level),
        }
    }
}

/// What happens when the cursor runs past the last word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndPolicy {
    /// Fixed session: signal completion
    #[default]
    Complete,
    /// Practice indefinitely: start over from the first word
    Wrap,
}

/// Parameters for building a session queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub mode: SessionMode,
    pub level: LevelFilter,
    pub end_policy: EndPolicy,
    /// Maximum number of words, applied after shuffling
    pub limit: Option<usize>,
    /// Seed for a reproducible shuffle
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn new(mode: SessionMode, level: LevelFilter, end_policy: EndPolicy) -> Self {
        Self {
            mode,
            level,
            end_policy,
            limit: None,
            seed: None,
        }
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
