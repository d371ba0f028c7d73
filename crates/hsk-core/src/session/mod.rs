//! Practice session sequencing
//!
//! A session is a filtered, shuffled list of words walked by a cursor.
//! Filters are chosen once at build time; changing level or mode means
//! building a new session. What happens after the last word is an explicit
//! [`EndPolicy`]: a fixed session completes, an endless one wraps.
//!
//! # Example
//!
//! ```rust
//! use hsk_core::session::{Advance, LevelFilter, SessionConfig, SessionSequencer};
//! use hsk_core::storage::MemoryStore;
//! use hsk_core::vocabulary::fallback_words;
//!
//! let config = SessionConfig::default().with_level(LevelFilter::Level(1));
//! let mut queue = SessionSequencer::with_seed(1)
//!     .build_session(&fallback_words(), &MemoryStore::new(), &config, 0)
//!     .into_queue()
//!     .expect("HSK 1 words");
//!
//! assert!(queue.current().is_some());
//! assert!(matches!(queue.advance(), Advance::Next(_)));
//! ```

mod queue;
mod sequencer;
mod types;

pub use queue::{Advance, SessionQueue};
pub use sequencer::{SessionBuild, SessionSequencer};
pub use types::{EndPolicy, LevelFilter, SessionConfig, SessionMode};
