//! End-to-end practice flows through the public API

use std::collections::HashSet;

use hsk_core::practice::{PracticeController, PracticeError, PracticeEvent, SessionStatus};
use hsk_core::session::{
    Advance, EndPolicy, LevelFilter, SessionConfig, SessionMode, SessionSequencer,
};
use hsk_core::srs::{Grade, ReviewScheduler, DAY_MS};
use hsk_core::stats::StatsSnapshot;
use hsk_core::storage::{MemoryStore, ProgressSnapshot, ReviewStateStore, StatsStore};
use hsk_core::vocabulary::{JsonVocabulary, VocabularyItem, VocabularyStore};
use pretty_assertions::assert_eq;

const NOW: i64 = 1704067200000; // 2024-01-01 00:00:00 UTC

const WORDS: &str = r#"[
    {"character": "A", "pinyin": "a", "translation": "alpha", "level": 1},
    {"character": "B", "pinyin": "b", "translation": "beta", "level": 1},
    {"character": "C", "pinyin": "c", "translation": "gamma", "level": 2}
]"#;

fn words() -> Vec<VocabularyItem> {
    JsonVocabulary::new(WORDS).load()
}

fn ids(items: &[VocabularyItem]) -> HashSet<String> {
    items.iter().map(|item| item.id.clone()).collect()
}

fn level_one(end_policy: EndPolicy) -> SessionConfig {
    SessionConfig::new(SessionMode::All, LevelFilter::Level(1), end_policy)
}

#[test]
fn test_level_filter_then_completion() {
    let store = MemoryStore::new();
    let mut sequencer = SessionSequencer::with_seed(1);
    let mut queue = sequencer
        .build_session(&words(), &store, &level_one(EndPolicy::Complete), NOW)
        .into_queue()
        .unwrap();

    assert_eq!(ids(queue.items()), ids(&words()[..2]));
    assert!(matches!(queue.advance(), Advance::Next(_)));
    assert!(matches!(queue.advance(), Advance::Complete));
    assert!(queue.is_exhausted());
}

#[test]
fn test_level_filter_then_wrap() {
    let store = MemoryStore::new();
    let mut sequencer = SessionSequencer::with_seed(1);
    let mut queue = sequencer
        .build_session(&words(), &store, &level_one(EndPolicy::Wrap), NOW)
        .into_queue()
        .unwrap();
    let first = queue.current().unwrap().id.clone();

    assert!(matches!(queue.advance(), Advance::Next(_)));
    match queue.advance() {
        Advance::Next(item) => assert_eq!(item.id, first),
        Advance::Complete => panic!("wrapping session completed"),
    }
}

#[test]
fn test_due_only_with_all_future_is_empty() {
    let scheduler = ReviewScheduler::new();
    let mut store = MemoryStore::new();
    for item in words() {
        store
            .put(&item.id, scheduler.calculate_next_review(None, Grade::Easy, NOW))
            .unwrap();
    }

    let config = SessionConfig {
        mode: SessionMode::DueOnly,
        ..Default::default()
    };
    let build = SessionSequencer::new().build_session(&words(), &store, &config, NOW + 1);
    assert!(build.is_empty());
}

#[test]
fn test_double_grade_counts_once() {
    let mut practice = PracticeController::new(words(), MemoryStore::new());
    practice.start_session(SessionConfig::default(), NOW);
    practice.reveal().unwrap();
    practice.grade(Grade::Good, NOW).unwrap();

    assert!(matches!(
        practice.grade(Grade::Again, NOW),
        Err(PracticeError::InvalidTransition { .. })
    ));
    assert_eq!(
        practice.stats(),
        StatsSnapshot {
            total_studied: 1,
            correct_answers: 1,
            wrong_answers: 0,
            current_streak: 1,
            best_streak: 1,
        }
    );
    assert_eq!(practice.store().count().unwrap(), 1);
}

#[test]
fn test_grade_without_reveal_mutates_nothing() {
    let mut practice = PracticeController::new(words(), MemoryStore::new());
    practice.start_session(SessionConfig::default(), NOW);

    assert!(practice.grade(Grade::Easy, NOW).is_err());
    assert_eq!(practice.store().count().unwrap(), 0);
    assert_eq!(practice.store().load().unwrap(), None);
    assert_eq!(practice.stats(), StatsSnapshot::default());
}

#[test]
fn test_review_cycle_over_days() {
    let mut practice = PracticeController::new(words(), MemoryStore::new())
        .with_sequencer(SessionSequencer::with_seed(4));

    // Day 0: learn everything
    assert_eq!(
        practice.start_session(SessionConfig::default(), NOW),
        SessionStatus::Active
    );
    let mut status = SessionStatus::Active;
    while status == SessionStatus::Active {
        practice.reveal().unwrap();
        practice.grade(Grade::Good, NOW).unwrap();
        status = practice.advance_to_next().unwrap();
    }
    assert_eq!(status, SessionStatus::Complete);
    assert_eq!(practice.stats().total_studied, 3);

    // Same day: nothing due
    assert_eq!(
        practice.change_mode(SessionMode::DueOnly, NOW + 1),
        SessionStatus::Empty
    );

    // Next day: everything due again, 3 days out after a second Good
    assert_eq!(
        practice.change_mode(SessionMode::DueOnly, NOW + DAY_MS),
        SessionStatus::Active
    );
    practice.reveal().unwrap();
    let outcome = practice.grade(Grade::Good, NOW + DAY_MS).unwrap();
    assert_eq!(outcome.review.repetitions, 2);
    assert_eq!(outcome.review.interval_days, 3);
}

#[test]
fn test_progress_survives_restart() {
    let mut practice = PracticeController::new(words(), MemoryStore::new());
    practice.start_session(SessionConfig::default(), NOW);
    practice.reveal().unwrap();
    practice.grade(Grade::Again, NOW).unwrap();

    let exported: ProgressSnapshot = practice.into_store().to_progress();
    let json = serde_json::to_string(&exported).unwrap();
    let imported: ProgressSnapshot = serde_json::from_str(&json).unwrap();

    let practice = PracticeController::new(words(), MemoryStore::from_progress(imported));
    assert_eq!(practice.stats().wrong_answers, 1);
    assert_eq!(practice.store().count().unwrap(), 1);
}

#[test]
fn test_events_serialize_for_adapters() {
    let mut practice = PracticeController::new(words(), MemoryStore::new());
    practice.start_session(SessionConfig::default().with_level(LevelFilter::Level(2)), NOW);

    let events = practice.drain_events();
    assert!(matches!(events[0], PracticeEvent::SessionStarted { size: 1, .. }));

    let json = serde_json::to_value(&events[1]).unwrap();
    assert_eq!(json["type"], "cardShown");
    assert_eq!(json["item"]["character"], "C");
    assert_eq!(json["position"], 0);
}
