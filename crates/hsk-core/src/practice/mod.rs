//! Practice flow
//!
//! [`PracticeController`] owns one learner's session and the current card.
//! Each card moves strictly through `Hidden -> Revealed -> Graded`; actions
//! out of order are rejected with a [`PracticeError`] and change nothing.
//!
//! Presentation layers drive the controller through its methods and read
//! back [`PracticeEvent`]s with [`PracticeController::drain_events`].
//!
//! # Example
//!
//! ```rust
//! use hsk_core::practice::{CardPhase, PracticeController, SessionStatus};
//! use hsk_core::session::{SessionConfig, SessionSequencer};
//! use hsk_core::srs::Grade;
//! use hsk_core::storage::MemoryStore;
//! use hsk_core::vocabulary::fallback_words;
//!
//! let mut practice = PracticeController::new(fallback_words(), MemoryStore::new())
//!     .with_sequencer(SessionSequencer::with_seed(7));
//!
//! assert_eq!(practice.start_session(SessionConfig::default(), 0), SessionStatus::Active);
//! practice.reveal().unwrap();
//! let outcome = practice.grade(Grade::Good, 0).unwrap();
//! assert_eq!(outcome.stats.total_studied, 1);
//! assert_eq!(practice.card().phase, CardPhase::Graded);
//! ```

mod controller;
mod error;
mod types;

pub use controller::PracticeController;
pub use error::{PracticeError, PracticeWarning};
pub use types::{
    Action, CardPhase, Controls, GradeOutcome, PracticeCardState, PracticeEvent, SessionStatus,
};
