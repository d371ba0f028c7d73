//! Practice state and event types

use serde::Serialize;

use super::error::PracticeWarning;
use crate::session::{EndPolicy, LevelFilter, SessionMode};
use crate::srs::{Grade, ReviewState};
use crate::stats::StatsSnapshot;
use crate::vocabulary::VocabularyItem;

/// Where the current card is in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CardPhase {
    /// Question side shown
    #[default]
    Hidden,
    /// Answer side shown, waiting for a grade
    Revealed,
    /// Grade recorded, waiting to move on
    Graded,
}

impl std::fmt::Display for CardPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hidden => write!(f, "hidden"),
            Self::Revealed => write!(f, "revealed"),
            Self::Graded => write!(f, "graded"),
        }
    }
}

/// User actions on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Reveal,
    Grade,
    Advance,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reveal => write!(f, "reveal"),
            Self::Grade => write!(f, "grade"),
            Self::Advance => write!(f, "advance"),
        }
    }
}

/// State of the session as a whole
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    /// No session started yet
    #[default]
    Idle,
    /// A card is on screen
    Active,
    /// The filters matched no words
    Empty,
    /// A fixed session ran out of words
    Complete,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Active => write!(f, "active"),
            Self::Empty => write!(f, "empty"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Transient per-card state, reset for every card
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeCardState {
    pub current_item: Option<VocabularyItem>,
    pub phase: CardPhase,
    pub grade: Option<Grade>,
}

impl PracticeCardState {
    pub(crate) fn showing(item: Option<VocabularyItem>) -> Self {
        Self {
            current_item: item,
            phase: CardPhase::Hidden,
            grade: None,
        }
    }

    pub fn revealed(&self) -> bool {
        self.phase != CardPhase::Hidden
    }
}

/// Which controls a presentation layer should enable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    pub can_reveal: bool,
    pub can_grade: bool,
    pub can_advance: bool,
}

/// Result of a successful grade
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOutcome {
    pub item_id: String,
    pub grade: Grade,
    pub review: ReviewState,
    pub stats: StatsSnapshot,
    /// Storage problems that did not stop the grade
    pub warnings: Vec<PracticeWarning>,
}

/// State changes published to presentation adapters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PracticeEvent {
    SessionStarted {
        size: usize,
        mode: SessionMode,
        level: LevelFilter,
        end_policy: EndPolicy,
    },
    SessionEmpty {
        mode: SessionMode,
        level: LevelFilter,
    },
    CardShown {
        item: VocabularyItem,
        position: usize,
    },
    CardRevealed {
        item_id: String,
    },
    CardGraded {
        item_id: String,
        grade: Grade,
        review: ReviewState,
        stats: StatsSnapshot,
    },
    SessionComplete {
        stats: StatsSnapshot,
    },
    StatsReset,
    Warning {
        warning: PracticeWarning,
    },
}
