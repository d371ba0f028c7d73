//! Vocabulary loading
//!
//! Word lists come from JSON files exported by several generations of data
//! scripts, so the loader accepts a few field spellings:
//!
//! ```json
//! [{"hanzi": "爱", "pinyin": "ài", "translation": "love", "level": 1}]
//! {"words": [{"character": "爸爸", "pinyin": "bàba", "translations": ["dad"], "hskLevel": 1}]}
//! ```
//!
//! Malformed entries are skipped. A document that cannot be parsed at all
//! never reaches the practice core as an error: [`JsonVocabulary`] falls back
//! to its configured list instead.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{default_id, is_valid_level, VocabularyItem};

/// Errors while reading vocabulary data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VocabularyError {
    #[error("vocabulary parse error: {0}")]
    Parse(String),

    #[error("invalid vocabulary entry '{character}': {reason}")]
    InvalidItem { character: String, reason: String },
}

/// Source of the word list
pub trait VocabularyStore {
    /// Return the full word list.
    ///
    /// Implementations never fail: unavailable data yields an empty or
    /// fallback list.
    fn load(&self) -> Vec<VocabularyItem>;
}

/// A word list held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticVocabulary {
    items: Vec<VocabularyItem>,
}

impl StaticVocabulary {
    pub fn new(items: Vec<VocabularyItem>) -> Self {
        Self { items }
    }
}

impl VocabularyStore for StaticVocabulary {
    fn load(&self) -> Vec<VocabularyItem> {
        self.items.clone()
    }
}

/// A word list parsed from JSON text on every load
#[derive(Debug, Clone, Default)]
pub struct JsonVocabulary {
    source: String,
    fallback: Vec<VocabularyItem>,
}

impl JsonVocabulary {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            fallback: Vec::new(),
        }
    }

    /// List returned when the source cannot be parsed
    pub fn with_fallback(mut self, fallback: Vec<VocabularyItem>) -> Self {
        self.fallback = fallback;
        self
    }
}

impl VocabularyStore for JsonVocabulary {
    fn load(&self) -> Vec<VocabularyItem> {
        match parse_vocabulary(&self.source) {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = self.fallback.len(),
                    "vocabulary unavailable, using fallback list"
                );
                self.fallback.clone()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDocument {
    List(Vec<Value>),
    Wrapped { words: Vec<Value> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTranslations {
    One(String),
    Many(Vec<String>),
}

impl Default for RawTranslations {
    fn default() -> Self {
        RawTranslations::Many(Vec::new())
    }
}

impl RawTranslations {
    fn into_vec(self) -> Vec<String> {
        let raw = match self {
            RawTranslations::One(s) => s.split(';').map(str::to_string).collect(),
            RawTranslations::Many(v) => v,
        };
        raw.into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    #[serde(default)]
    id: Option<String>,
    #[serde(alias = "hanzi", alias = "simplified")]
    character: String,
    #[serde(default)]
    pinyin: String,
    #[serde(default, alias = "translation", alias = "english", alias = "meanings")]
    translations: RawTranslations,
    #[serde(alias = "level", alias = "hsk_level", alias = "hsk")]
    hsk_level: RawLevel,
}

/// HSK level as a number or a numeric string ("1", "HSK 2")
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Number(i64),
    Text(String),
}

impl RawLevel {
    fn parse(&self) -> Option<u8> {
        match self {
            RawLevel::Number(n) => u8::try_from(*n).ok(),
            RawLevel::Text(s) => s
                .trim()
                .trim_start_matches(|c: char| c.is_ascii_alphabetic() || c.is_whitespace())
                .parse()
                .ok(),
        }
    }
}

impl RawItem {
    fn from_value(value: Value) -> Result<Self, VocabularyError> {
        let character = ["character", "hanzi", "simplified"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .unwrap_or("?")
            .to_string();
        serde_json::from_value(value).map_err(|e| VocabularyError::InvalidItem {
            character,
            reason: e.to_string(),
        })
    }

    fn into_item(self) -> Result<VocabularyItem, VocabularyError> {
        let character = self.character.trim().to_string();
        if character.is_empty() {
            return Err(VocabularyError::InvalidItem {
                character,
                reason: "empty character".to_string(),
            });
        }
        let hsk_level = match self.hsk_level.parse() {
            Some(level) if is_valid_level(level) => level,
            _ => {
                return Err(VocabularyError::InvalidItem {
                    character,
                    reason: "HSK level is not a number in 1-6".to_string(),
                })
            }
        };

        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| default_id(hsk_level, &character));

        Ok(VocabularyItem {
            id,
            character,
            pinyin: self.pinyin.trim().to_string(),
            translations: self.translations.into_vec(),
            hsk_level,
        })
    }
}

/// Parse a JSON word list.
///
/// Fails only if the document itself is unreadable; invalid and duplicate
/// entries are skipped with a log line.
pub fn parse_vocabulary(json: &str) -> Result<Vec<VocabularyItem>, VocabularyError> {
    let document: RawDocument =
        serde_json::from_str(json).map_err(|e| VocabularyError::Parse(e.to_string()))?;

    let raw_items = match document {
        RawDocument::List(items) => items,
        RawDocument::Wrapped { words } => words,
    };

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(raw_items.len());

    for raw in raw_items {
        match RawItem::from_value(raw).and_then(RawItem::into_item) {
            Ok(item) => {
                if seen.insert(item.id.clone()) {
                    items.push(item);
                } else {
                    debug!(id = %item.id, "skipping duplicate vocabulary entry");
                }
            }
            Err(e) => warn!(error = %e, "skipping vocabulary entry"),
        }
    }

    debug!(count = items.len(), "parsed vocabulary");
    Ok(items)
}

/// Distinct HSK levels present in a word list, ascending.
pub fn levels(items: &[VocabularyItem]) -> Vec<u8> {
    let mut levels: Vec<u8> = items.iter().map(|i| i.hsk_level).collect();
    levels.sort_unstable();
    levels.dedup();
    levels
}

/// Small built-in HSK 1 list used when no word list can be loaded.
pub fn fallback_words() -> Vec<VocabularyItem> {
    const WORDS: &[(&str, &str, &str)] = &[
        ("爱", "ài", "love"),
        ("八", "bā", "eight"),
        ("爸爸", "bàba", "dad"),
        ("北京", "Běijīng", "Beijing"),
        ("不", "bù", "no; not"),
        ("吃", "chī", "eat"),
        ("大", "dà", "big"),
        ("的", "de", "possessive particle"),
        ("对不起", "duìbuqǐ", "sorry"),
        ("好", "hǎo", "good"),
        ("喝", "hē", "drink"),
        ("你", "nǐ", "you"),
        ("人", "rén", "person"),
        ("是", "shì", "to be"),
        ("水", "shuǐ", "water"),
        ("我", "wǒ", "I; me"),
        ("谢谢", "xièxie", "thank you"),
        ("一", "yī", "one"),
    ];

    WORDS
        .iter()
        .map(|(character, pinyin, translation)| {
            VocabularyItem::new(
                *character,
                *pinyin,
                translation.split("; ").map(str::to_string).collect(),
                1,
            )
        })
        .collect()
}
