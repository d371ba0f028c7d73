//! JSON bridge over a page-wide practice controller

use std::cell::RefCell;

use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use hsk_core::practice::{Controls, PracticeCardState, PracticeController, SessionStatus};
use hsk_core::quiz::{build_question, QuizQuestion};
use hsk_core::session::{LevelFilter, SessionConfig};
use hsk_core::srs::Grade;
use hsk_core::stats::StatsSnapshot;
use hsk_core::storage::{MemoryStore, ProgressSnapshot};
use hsk_core::vocabulary::{self, fallback_words};

type Practice = PracticeController<MemoryStore>;

/// Single practice controller for the page.
/// WASM is single-threaded; created lazily with the bundled starter words.
thread_local! {
    static PRACTICE: RefCell<Option<Practice>> = const { RefCell::new(None) };
    static QUIZ: RefCell<Option<QuizQuestion>> = const { RefCell::new(None) };
}

/// Everything a page needs to render the current card
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeView {
    pub status: SessionStatus,
    pub card: PracticeCardState,
    pub controls: Controls,
    pub stats: StatsSnapshot,
    pub accuracy: f64,
    pub position: usize,
    pub size: usize,
}

impl PracticeView {
    fn of(practice: &Practice) -> Self {
        let stats = practice.stats();
        Self {
            status: practice.status(),
            card: practice.card().clone(),
            controls: practice.controls(),
            accuracy: stats.accuracy(),
            stats,
            position: practice.queue().map(|q| q.position()).unwrap_or(0),
            size: practice.queue().map(|q| q.len()).unwrap_or(0),
        }
    }
}

fn with_practice<T, F>(f: F) -> String
where
    T: Serialize,
    F: FnOnce(&mut Practice) -> Result<T, String>,
{
    PRACTICE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let practice =
            slot.get_or_insert_with(|| PracticeController::new(fallback_words(), MemoryStore::new()));
        respond(f(practice))
    })
}

/// Replace the page controller, keeping its word list or progress as needed.
fn rebuild<F>(f: F)
where
    F: FnOnce(Option<Practice>) -> Practice,
{
    PRACTICE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let old = slot.take();
        *slot = Some(f(old));
    });
    QUIZ.with(|q| q.borrow_mut().take());
}

fn respond<T: Serialize>(result: Result<T, String>) -> String {
    match result.and_then(|value| serde_json::to_string(&value).map_err(|e| e.to_string())) {
        Ok(json) => json,
        Err(message) => error_json(&message),
    }
}

fn error_json(message: &str) -> String {
    json!({ "error": message }).to_string()
}

fn js_time(now_ms: f64) -> i64 {
    now_ms as i64
}

// ============================================================================
// Setup
// ============================================================================

/// Get the bridge version (e.g. "0.1.0").
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Replace the word list. Progress is kept.
///
/// Returns: `{"loaded":150,"levels":[1,2]}`
pub fn load_vocabulary(words_json: &str) -> String {
    let words = match vocabulary::parse_vocabulary(words_json) {
        Ok(words) if !words.is_empty() => words,
        Ok(_) => return error_json("vocabulary contains no usable words"),
        Err(e) => {
            warn!(error = %e, "rejected vocabulary");
            return error_json(&e.to_string());
        }
    };

    let response = json!({
        "loaded": words.len(),
        "levels": vocabulary::levels(&words),
    });
    rebuild(|old| {
        let store = old.map(Practice::into_store).unwrap_or_default();
        PracticeController::new(words, store)
    });
    response.to_string()
}

/// Replace all progress with an exported snapshot. The word list is kept.
pub fn import_progress(progress_json: &str) -> String {
    let progress: ProgressSnapshot = match serde_json::from_str(progress_json) {
        Ok(progress) => progress,
        Err(e) => return error_json(&format!("invalid progress: {}", e)),
    };

    let reviews = progress.reviews.len();
    rebuild(|old| {
        let pool = old
            .map(|practice| practice.pool().to_vec())
            .unwrap_or_else(fallback_words);
        PracticeController::new(pool, MemoryStore::from_progress(progress))
    });
    info!(reviews, "imported progress");
    json!({ "reviews": reviews }).to_string()
}

/// Export all progress for the page to keep (e.g. in localStorage).
pub fn export_progress() -> String {
    with_practice(|practice| Ok(practice.store().to_progress()))
}

// ============================================================================
// Practice
// ============================================================================

/// Start a session. `config_json` is a partial session config such as
/// `{"mode":"dueOnly","level":1,"endPolicy":"wrap"}`; `""` means defaults.
pub fn start_session(config_json: &str, now_ms: f64) -> String {
    let config: SessionConfig = if config_json.trim().is_empty() {
        SessionConfig::default()
    } else {
        match serde_json::from_str(config_json) {
            Ok(config) => config,
            Err(e) => return error_json(&format!("invalid session config: {}", e)),
        }
    };

    QUIZ.with(|q| q.borrow_mut().take());
    with_practice(|practice| {
        practice.start_session(config, js_time(now_ms));
        Ok(PracticeView::of(practice))
    })
}

/// Rebuild the session for one HSK level, or all levels when `level` is 0.
pub fn change_level(level: u8, now_ms: f64) -> String {
    let filter = match level {
        0 => LevelFilter::All,
        level => LevelFilter::Level(level),
    };
    QUIZ.with(|q| q.borrow_mut().take());
    with_practice(|practice| {
        practice.change_level(filter, js_time(now_ms));
        Ok(PracticeView::of(practice))
    })
}

/// Current card, controls and stats
pub fn state() -> String {
    with_practice(|practice| Ok(PracticeView::of(practice)))
}

pub fn reveal() -> String {
    with_practice(|practice| {
        practice.reveal().map_err(|e| e.to_string())?;
        Ok(PracticeView::of(practice))
    })
}

/// Grade the revealed card. Accepts `again|hard|good|easy`, `1-4`, or
/// `known|unknown`.
///
/// Returns the grade outcome (new review state, stats, warnings).
pub fn grade(grade: &str, now_ms: f64) -> String {
    let grade: Grade = match grade.parse() {
        Ok(grade) => grade,
        Err(e) => return error_json(&e.to_string()),
    };
    with_practice(|practice| {
        practice
            .grade(grade, js_time(now_ms))
            .map_err(|e| e.to_string())
    })
}

pub fn advance() -> String {
    QUIZ.with(|q| q.borrow_mut().take());
    with_practice(|practice| {
        practice.advance_to_next().map_err(|e| e.to_string())?;
        Ok(PracticeView::of(practice))
    })
}

pub fn restart_session() -> String {
    QUIZ.with(|q| q.borrow_mut().take());
    with_practice(|practice| {
        practice.restart_session().map_err(|e| e.to_string())?;
        Ok(PracticeView::of(practice))
    })
}

pub fn stats() -> String {
    with_practice(|practice| Ok(practice.stats()))
}

/// Zero statistics. The page is expected to have asked for confirmation.
pub fn reset_stats() -> String {
    with_practice(|practice| {
        let warnings = practice.reset_stats();
        Ok(json!({ "stats": practice.stats(), "warnings": warnings }))
    })
}

/// Events since the last call, as a JSON array
pub fn drain_events() -> String {
    with_practice(|practice| Ok(practice.drain_events()))
}

// ============================================================================
// Quiz
// ============================================================================

/// Multiple-choice question for the current (hidden) card.
pub fn quiz_question(choices: u32) -> String {
    let question = PRACTICE.with(|cell| {
        let slot = cell.borrow();
        let practice = slot.as_ref().ok_or("no session started")?;
        let item = practice
            .card()
            .current_item
            .as_ref()
            .ok_or("no card to quiz on")?;
        build_question(
            item,
            practice.pool(),
            choices as usize,
            &mut rand::thread_rng(),
        )
        .map_err(|e| e.to_string())
    });

    match question {
        Ok(question) => {
            let json = respond(Ok(&question));
            QUIZ.with(|q| *q.borrow_mut() = Some(question));
            json
        }
        Err(message) => error_json(&message),
    }
}

/// Answer the open quiz question. Reveals and grades the card in one step.
/// A question asked about some other card is discarded without grading.
///
/// Returns: `{"correct":true,"correctIndex":2,"outcome":{...}}`
pub fn quiz_answer(index: u32, now_ms: f64) -> String {
    let question = match QUIZ.with(|q| q.borrow_mut().take()) {
        Some(question) => question,
        None => return error_json("no open quiz question"),
    };
    let grade = match question.answer(index as usize) {
        Ok(grade) => grade,
        Err(e) => {
            let message = e.to_string();
            QUIZ.with(|q| *q.borrow_mut() = Some(question));
            return error_json(&message);
        }
    };

    with_practice(|practice| {
        let current = practice.card().current_item.as_ref().map(|item| item.id.as_str());
        if current != Some(question.item.id.as_str()) {
            warn!(id = %question.item.id, "discarded stale quiz question");
            return Err(format!(
                "quiz question for '{}' does not match the current card",
                question.item.id
            ));
        }
        practice.reveal().map_err(|e| e.to_string())?;
        let outcome = practice
            .grade(grade, js_time(now_ms))
            .map_err(|e| e.to_string())?;
        Ok(json!({
            "correct": grade.is_success(),
            "correctIndex": question.correct_index,
            "outcome": outcome,
        }))
    })
}
