//! HSK vocabulary reference data

mod loader;
mod types;

pub use loader::{
    fallback_words, levels, parse_vocabulary, JsonVocabulary, StaticVocabulary, VocabularyError,
    VocabularyStore,
};
pub use types::{default_id, is_valid_level, VocabularyItem, MAX_LEVEL, MIN_LEVEL};
