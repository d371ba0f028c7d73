//! Practice error types

use serde::Serialize;
use thiserror::Error;

use super::types::{Action, CardPhase, SessionStatus};

/// A rejected user action. Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PracticeError {
    /// The action is not allowed in the current card phase
    #[error("cannot {action} while the card is {phase}")]
    InvalidTransition { action: Action, phase: CardPhase },

    /// There is no card on screen (no session yet, or the session ended)
    #[error("no card to practice, session is {0}")]
    NoActiveCard(SessionStatus),

    /// The session filters matched no words
    #[error("no words match the selected level and mode")]
    EmptySessionPool,
}

/// A storage problem that was logged and skipped.
///
/// Progress tracking never blocks practice: the in-memory state has already
/// moved on when one of these is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PracticeWarning {
    #[error("could not read review state of '{item_id}': {message}")]
    ReviewUnavailable { item_id: String, message: String },

    #[error("could not save review state of '{item_id}': {message}")]
    ReviewNotSaved { item_id: String, message: String },

    #[error("could not load statistics: {message}")]
    StatsUnavailable { message: String },

    #[error("could not save statistics: {message}")]
    StatsNotSaved { message: String },
}
