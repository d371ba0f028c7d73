//! HSK Practice Core
//!
//! The learning engine behind the HSK vocabulary trainer, shared by the
//! terminal client and the browser bridge. Nothing here touches files,
//! clocks or the DOM: time is passed in as Unix milliseconds and progress
//! goes through the [`storage`] traits.
//!
//! # Modules
//!
//! - [`vocabulary`] - word records and list parsing
//! - [`srs`] - SM-2 style review scheduling
//! - [`session`] - filtered, shuffled session queues
//! - [`practice`] - the per-card state machine
//! - [`stats`] - study counters and streaks
//! - [`quiz`] - multiple-choice questions
//! - [`storage`] - progress persistence traits and an in-memory backend
//!
//! # Features
//!
//! - `std` - default, standard library build
//! - `wasm` - WASM-compatible build
//!
//! # Example
//!
//! ```rust
//! use hsk_core::{Grade, MemoryStore, PracticeController, SessionConfig, SessionStatus};
//! use hsk_core::vocabulary::fallback_words;
//!
//! let mut practice = PracticeController::new(fallback_words(), MemoryStore::new());
//! assert_eq!(practice.start_session(SessionConfig::default(), 0), SessionStatus::Active);
//!
//! practice.reveal().unwrap();
//! practice.grade(Grade::Again, 0).unwrap();
//! assert_eq!(practice.stats().wrong_answers, 1);
//! ```

pub mod practice;
pub mod quiz;
pub mod session;
pub mod srs;
pub mod stats;
pub mod storage;
pub mod vocabulary;

// Re-export main types at crate root
pub use practice::{
    Action, CardPhase, Controls, GradeOutcome, PracticeCardState, PracticeController,
    PracticeError, PracticeEvent, PracticeWarning, SessionStatus,
};
pub use quiz::{build_question, QuizError, QuizQuestion};
pub use session::{
    Advance, EndPolicy, LevelFilter, SessionBuild, SessionConfig, SessionMode, SessionQueue,
    SessionSequencer,
};
pub use srs::{
    ConfigError, Grade, ParseGradeError, ReviewScheduler, ReviewState, SchedulerConfig, DAY_MS,
};
pub use stats::{StatsAggregator, StatsSnapshot};
pub use storage::{
    MemoryStore, ProgressSnapshot, ProgressStore, ReviewStateStore, StatsStore, StoreError,
    StoreResult,
};
pub use vocabulary::{VocabularyError, VocabularyItem, VocabularyStore};
