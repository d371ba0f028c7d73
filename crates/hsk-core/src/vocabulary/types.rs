//! Vocabulary type definitions

use serde::{Deserialize, Serialize};

/// Lowest HSK level
pub const MIN_LEVEL: u8 = 1;
/// Highest HSK level
pub const MAX_LEVEL: u8 = 6;

/// Returns true if `level` is a valid HSK level (1-6).
pub fn is_valid_level(level: u8) -> bool {
    (MIN_LEVEL..=MAX_LEVEL).contains(&level)
}

/// A single vocabulary entry.
///
/// Reference data: loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    /// Stable identifier used as the review state key (e.g. "hsk1-爱")
    pub id: String,

    /// Simplified Chinese characters
    pub character: String,

    /// Tone-marked pinyin
    pub pinyin: String,

    /// English translations, most common first
    pub translations: Vec<String>,

    /// HSK level (1-6)
    pub hsk_level: u8,
}

impl VocabularyItem {
    pub fn new(
        character: impl Into<String>,
        pinyin: impl Into<String>,
        translations: Vec<String>,
        hsk_level: u8,
    ) -> Self {
        let character = character.into();
        Self {
            id: default_id(hsk_level, &character),
            character,
            pinyin: pinyin.into(),
            translations,
            hsk_level,
        }
    }

    /// Override the generated identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// All translations joined for display
    pub fn translation(&self) -> String {
        self.translations.join("; ")
    }
}

/// Identifier given to entries whose source data carries none.
pub fn default_id(hsk_level: u8, character: &str) -> String {
    format!("hsk{}-{}", hsk_level, character)
}
