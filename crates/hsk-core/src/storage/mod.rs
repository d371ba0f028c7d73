//! Storage abstraction for learner progress
//!
//! The practice core never owns durable storage. It talks to two small
//! traits that backends implement:
//!
//! - [`ReviewStateStore`]: per-word review states, read at session build
//!   time and written one word at a time after each grade
//! - [`StatsStore`]: the aggregated [`StatsSnapshot`](crate::stats::StatsSnapshot)
//!
//! [`MemoryStore`] implements both. The CLI ships a JSON file backend and the
//! browser bridge exports [`ProgressSnapshot`]s for the page to keep.
//!
//! # Example
//!
//! ```rust
//! use hsk_core::srs::{Grade, ReviewScheduler};
//! use hsk_core::storage::{MemoryStore, ReviewStateStore};
//!
//! let mut store = MemoryStore::new();
//! let state = ReviewScheduler::new().calculate_next_review(None, Grade::Good, 0);
//!
//! store.put("hsk1-ai", state).unwrap();
//! assert!(store.get("hsk1-ai").unwrap().is_some());
//! ```

mod error;
mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use traits::{ProgressSnapshot, ProgressStore, ReviewStateStore, StatsStore};
