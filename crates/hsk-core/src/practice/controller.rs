//! PracticeController - the per-card state machine
//!
//! ```text
//! Hidden --reveal--> Revealed --grade--> Graded --advance--> Hidden (next card)
//! ```
//!
//! Grading runs scheduler, review persistence, stats and the phase change as
//! one unit, in that order. Storage failures are reported as warnings and
//! never undo or block the in-memory transition.

use tracing::{debug, info, warn};

use super::error::{PracticeError, PracticeWarning};
use super::types::{
    Action, CardPhase, Controls, GradeOutcome, PracticeCardState, PracticeEvent, SessionStatus,
};
use crate::session::{
    Advance, LevelFilter, SessionBuild, SessionConfig, SessionMode, SessionQueue, SessionSequencer,
};
use crate::srs::{Grade, ReviewScheduler};
use crate::stats::{StatsAggregator, StatsSnapshot};
use crate::storage::ProgressStore;
use crate::vocabulary::VocabularyItem;

/// Drives one learner through practice sessions.
///
/// Constructed once per learner and handed to whatever presents cards; the
/// controller owns all mutable practice state.
pub struct PracticeController<S: ProgressStore> {
    pool: Vec<VocabularyItem>,
    store: S,
    scheduler: ReviewScheduler,
    sequencer: SessionSequencer,
    stats: StatsAggregator,
    session_config: SessionConfig,
    queue: Option<SessionQueue>,
    status: SessionStatus,
    card: PracticeCardState,
    events: Vec<PracticeEvent>,
}

impl<S: ProgressStore> PracticeController<S> {
    /// Create a controller over a word list and a progress store.
    ///
    /// Saved statistics are restored from the store; if they cannot be read
    /// counting starts from zero.
    pub fn new(pool: Vec<VocabularyItem>, store: S) -> Self {
        let mut events = Vec::new();
        let stats = match store.load() {
            Ok(Some(snapshot)) => StatsAggregator::from_snapshot(snapshot),
            Ok(None) => StatsAggregator::new(),
            Err(e) => {
                warn!(error = %e, "statistics unavailable, starting from zero");
                events.push(PracticeEvent::Warning {
                    warning: PracticeWarning::StatsUnavailable {
                        message: e.to_string(),
                    },
                });
                StatsAggregator::new()
            }
        };

        Self {
            pool,
            store,
            scheduler: ReviewScheduler::new(),
            sequencer: SessionSequencer::new(),
            stats,
            session_config: SessionConfig::default(),
            queue: None,
            status: SessionStatus::Idle,
            card: PracticeCardState::default(),
            events,
        }
    }

    /// Use a custom scheduler
    pub fn with_scheduler(mut self, scheduler: ReviewScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Use a custom sequencer (e.g. a seeded one)
    pub fn with_sequencer(mut self, sequencer: SessionSequencer) -> Self {
        self.sequencer = sequencer;
        self
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Build a new session, discarding any card in progress.
    pub fn start_session(&mut self, config: SessionConfig, now_ms: i64) -> SessionStatus {
        self.card = PracticeCardState::default();
        self.session_config = config;

        match self
            .sequencer
            .build_session(&self.pool, &self.store, &self.session_config, now_ms)
        {
            SessionBuild::Ready(queue) => {
                info!(
                    size = queue.len(),
                    level = %self.session_config.level,
                    "session started"
                );
                self.events.push(PracticeEvent::SessionStarted {
                    size: queue.len(),
                    mode: self.session_config.mode,
                    level: self.session_config.level,
                    end_policy: self.session_config.end_policy,
                });
                self.card = PracticeCardState::showing(queue.current().cloned());
                self.queue = Some(queue);
                self.status = SessionStatus::Active;
                self.push_card_shown();
            }
            SessionBuild::Empty => {
                info!(level = %self.session_config.level, "no words match session filters");
                self.events.push(PracticeEvent::SessionEmpty {
                    mode: self.session_config.mode,
                    level: self.session_config.level,
                });
                self.queue = None;
                self.status = SessionStatus::Empty;
            }
        }

        self.status
    }

    /// Rebuild the session for a different HSK level.
    pub fn change_level(&mut self, level: LevelFilter, now_ms: i64) -> SessionStatus {
        let config = SessionConfig {
            level,
            ..self.session_config.clone()
        };
        self.start_session(config, now_ms)
    }

    /// Rebuild the session with a different mode.
    pub fn change_mode(&mut self, mode: SessionMode, now_ms: i64) -> SessionStatus {
        let config = SessionConfig {
            mode,
            ..self.session_config.clone()
        };
        self.start_session(config, now_ms)
    }

    /// Go back to the first word of the current session without reshuffling.
    pub fn restart_session(&mut self) -> Result<SessionStatus, PracticeError> {
        let queue = match self.queue.as_mut() {
            Some(queue) => queue,
            None if self.status == SessionStatus::Empty => {
                return Err(PracticeError::EmptySessionPool)
            }
            None => return Err(PracticeError::NoActiveCard(self.status)),
        };

        queue.restart();
        self.card = PracticeCardState::showing(queue.current().cloned());
        self.status = SessionStatus::Active;
        self.push_card_shown();
        Ok(self.status)
    }

    // ========================================================================
    // Card transitions
    // ========================================================================

    /// Show the answer side of the current card.
    pub fn reveal(&mut self) -> Result<(), PracticeError> {
        let item_id = match &self.card.current_item {
            Some(item) => item.id.clone(),
            None => return Err(self.no_card_error()),
        };
        if self.card.phase != CardPhase::Hidden {
            return Err(self.reject(Action::Reveal));
        }

        self.card.phase = CardPhase::Revealed;
        debug!(id = %item_id, "card revealed");
        self.events.push(PracticeEvent::CardRevealed { item_id });
        Ok(())
    }

    /// Record the learner's grade for the revealed card.
    pub fn grade(&mut self, grade: Grade, now_ms: i64) -> Result<GradeOutcome, PracticeError> {
        if self.card.current_item.is_none() {
            return Err(self.no_card_error());
        }
        if self.card.phase != CardPhase::Revealed {
            return Err(self.reject(Action::Grade));
        }
        let item_id = match &self.card.current_item {
            Some(item) => item.id.clone(),
            None => return Err(self.no_card_error()),
        };

        let mut warnings = Vec::new();

        // (1) schedule
        let previous = match self.store.get(&item_id) {
            Ok(state) => state,
            Err(e) => {
                warn!(id = %item_id, error = %e, "review state unavailable, scheduling as new");
                warnings.push(PracticeWarning::ReviewUnavailable {
                    item_id: item_id.clone(),
                    message: e.to_string(),
                });
                None
            }
        };
        let review = self
            .scheduler
            .calculate_next_review(previous.as_ref(), grade, now_ms);

        // (2) persist review state
        if let Err(e) = self.store.put(&item_id, review.clone()) {
            warn!(id = %item_id, error = %e, "failed to save review state");
            warnings.push(PracticeWarning::ReviewNotSaved {
                item_id: item_id.clone(),
                message: e.to_string(),
            });
        }

        // (3) stats
        self.stats.record(grade);
        let stats = self.stats.snapshot();
        if let Err(e) = self.store.save(&stats) {
            warn!(error = %e, "failed to save statistics");
            warnings.push(PracticeWarning::StatsNotSaved {
                message: e.to_string(),
            });
        }

        // (4) transition
        self.card.phase = CardPhase::Graded;
        self.card.grade = Some(grade);

        debug!(
            id = %item_id,
            grade = %grade,
            interval_days = review.interval_days,
            "card graded"
        );
        self.events.push(PracticeEvent::CardGraded {
            item_id: item_id.clone(),
            grade,
            review: review.clone(),
            stats: stats.clone(),
        });
        for warning in &warnings {
            self.events.push(PracticeEvent::Warning {
                warning: warning.clone(),
            });
        }

        Ok(GradeOutcome {
            item_id,
            grade,
            review,
            stats,
            warnings,
        })
    }

    /// Move on from a graded card.
    pub fn advance_to_next(&mut self) -> Result<SessionStatus, PracticeError> {
        if self.card.current_item.is_none() {
            return Err(self.no_card_error());
        }
        if self.card.phase != CardPhase::Graded {
            return Err(self.reject(Action::Advance));
        }
        let queue = match self.queue.as_mut() {
            Some(queue) => queue,
            None => return Err(PracticeError::NoActiveCard(self.status)),
        };

        match queue.advance() {
            Advance::Next(item) => {
                self.card = PracticeCardState::showing(Some(item.clone()));
                self.status = SessionStatus::Active;
                self.push_card_shown();
            }
            Advance::Complete => {
                info!(
                    studied = self.stats.snapshot().total_studied,
                    "session complete"
                );
                self.card = PracticeCardState::default();
                self.status = SessionStatus::Complete;
                self.events.push(PracticeEvent::SessionComplete {
                    stats: self.stats.snapshot(),
                });
            }
        }

        Ok(self.status)
    }

    /// Zero all statistics and persist the empty snapshot.
    ///
    /// Confirmation is the caller's responsibility.
    pub fn reset_stats(&mut self) -> Vec<PracticeWarning> {
        self.stats.reset();
        self.events.push(PracticeEvent::StatsReset);

        match self.store.save(&self.stats.snapshot()) {
            Ok(()) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to save reset statistics");
                let warning = PracticeWarning::StatsNotSaved {
                    message: e.to_string(),
                };
                self.events.push(PracticeEvent::Warning {
                    warning: warning.clone(),
                });
                vec![warning]
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Which actions are currently allowed
    pub fn controls(&self) -> Controls {
        let has_card = self.card.current_item.is_some();
        Controls {
            can_reveal: has_card && self.card.phase == CardPhase::Hidden,
            can_grade: has_card && self.card.phase == CardPhase::Revealed,
            can_advance: has_card && self.card.phase == CardPhase::Graded,
        }
    }

    pub fn card(&self) -> &PracticeCardState {
        &self.card
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn queue(&self) -> Option<&SessionQueue> {
        self.queue.as_ref()
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.session_config
    }

    pub fn pool(&self) -> &[VocabularyItem] {
        &self.pool
    }

    pub fn scheduler(&self) -> &ReviewScheduler {
        &self.scheduler
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Take all events published since the last call.
    pub fn drain_events(&mut self) -> Vec<PracticeEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_card_shown(&mut self) {
        if let (Some(item), Some(queue)) = (&self.card.current_item, &self.queue) {
            self.events.push(PracticeEvent::CardShown {
                item: item.clone(),
                position: queue.position(),
            });
        }
    }

    fn reject(&self, action: Action) -> PracticeError {
        debug!(%action, phase = %self.card.phase, "rejected card action");
        PracticeError::InvalidTransition {
            action,
            phase: self.card.phase,
        }
    }

    fn no_card_error(&self) -> PracticeError {
        match self.status {
            SessionStatus::Empty => PracticeError::EmptySessionPool,
            status => PracticeError::NoActiveCard(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::EndPolicy;
    use crate::srs::{ReviewState, DAY_MS};
    use crate::storage::{MemoryStore, ReviewStateStore, StatsStore, StoreError, StoreResult};
    use pretty_assertions::assert_eq;

    const NOW: i64 = 1_704_067_200_000;

    fn pool() -> Vec<VocabularyItem> {
        vec![
            VocabularyItem::new("A", "a", vec!["alpha".into()], 1),
            VocabularyItem::new("B", "b", vec!["beta".into()], 1),
            VocabularyItem::new("C", "c", vec!["gamma".into()], 2),
        ]
    }

    fn controller() -> PracticeController<MemoryStore> {
        PracticeController::new(pool(), MemoryStore::new())
            .with_sequencer(SessionSequencer::with_seed(11))
    }

    fn current_id<S: ProgressStore>(c: &PracticeController<S>) -> String {
        c.card().current_item.as_ref().unwrap().id.clone()
    }

    /// Store whose writes always fail
    #[derive(Default)]
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl ReviewStateStore for ReadOnlyStore {
        fn get(&self, item_id: &str) -> StoreResult<Option<ReviewState>> {
            self.inner.get(item_id)
        }
        fn put(&mut self, _item_id: &str, _state: ReviewState) -> StoreResult<()> {
            Err(StoreError::Unavailable("offline".into()))
        }
        fn ids(&self) -> StoreResult<Vec<String>> {
            self.inner.ids()
        }
        fn clear(&mut self) -> StoreResult<()> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    impl StatsStore for ReadOnlyStore {
        fn load(&self) -> StoreResult<Option<StatsSnapshot>> {
            Err(StoreError::Backend("corrupt".into()))
        }
        fn save(&mut self, _stats: &StatsSnapshot) -> StoreResult<()> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn test_full_card_cycle() {
        let mut c = controller();
        assert_eq!(c.start_session(SessionConfig::default(), NOW), SessionStatus::Active);
        assert_eq!(
            c.controls(),
            Controls {
                can_reveal: true,
                can_grade: false,
                can_advance: false
            }
        );

        c.reveal().unwrap();
        assert!(c.card().revealed());
        assert!(c.controls().can_grade);

        let id = current_id(&c);
        let outcome = c.grade(Grade::Good, NOW).unwrap();
        assert_eq!(outcome.item_id, id);
        assert_eq!(outcome.review.repetitions, 1);
        assert_eq!(outcome.review.interval_days, 1);
        assert_eq!(outcome.review.due_at, NOW + DAY_MS);
        assert!(outcome.warnings.is_empty());
        assert_eq!(c.store().get(&id).unwrap(), Some(outcome.review.clone()));
        assert_eq!(c.store().load().unwrap(), Some(outcome.stats.clone()));
        assert!(c.controls().can_advance);

        assert_eq!(c.advance_to_next().unwrap(), SessionStatus::Active);
        assert_eq!(c.card().phase, CardPhase::Hidden);
        assert_eq!(c.card().grade, None);
        assert_ne!(current_id(&c), id);
    }

    #[test]
    fn test_grade_before_reveal_rejected() {
        let mut c = controller();
        c.start_session(SessionConfig::default(), NOW);

        let err = c.grade(Grade::Good, NOW).unwrap_err();
        assert_eq!(
            err,
            PracticeError::InvalidTransition {
                action: Action::Grade,
                phase: CardPhase::Hidden
            }
        );
        assert_eq!(c.store().count().unwrap(), 0);
        assert_eq!(c.store().load().unwrap(), None);
        assert_eq!(c.stats(), StatsSnapshot::default());
    }

    #[test]
    fn test_second_grade_rejected() {
        let mut c = controller();
        c.start_session(SessionConfig::default(), NOW);
        c.reveal().unwrap();
        c.grade(Grade::Good, NOW).unwrap();

        let err = c.grade(Grade::Again, NOW).unwrap_err();
        assert!(matches!(
            err,
            PracticeError::InvalidTransition {
                action: Action::Grade,
                phase: CardPhase::Graded
            }
        ));
        assert_eq!(c.stats().total_studied, 1);
        assert_eq!(c.stats().correct_answers, 1);
        assert_eq!(c.card().grade, Some(Grade::Good));
    }

    #[test]
    fn test_reveal_and_advance_rejected_out_of_phase() {
        let mut c = controller();
        c.start_session(SessionConfig::default(), NOW);

        assert!(matches!(
            c.advance_to_next(),
            Err(PracticeError::InvalidTransition {
                action: Action::Advance,
                ..
            })
        ));

        c.reveal().unwrap();
        assert!(matches!(
            c.reveal(),
            Err(PracticeError::InvalidTransition {
                action: Action::Reveal,
                phase: CardPhase::Revealed
            })
        ));
    }

    #[test]
    fn test_idle_controller_has_no_card() {
        let mut c = controller();
        assert_eq!(c.status(), SessionStatus::Idle);
        assert_eq!(c.reveal(), Err(PracticeError::NoActiveCard(SessionStatus::Idle)));
        assert_eq!(c.controls(), Controls::default());
    }

    #[test]
    fn test_empty_session() {
        let mut c = controller();
        let status = c.start_session(
            SessionConfig::default().with_level(LevelFilter::Level(5)),
            NOW,
        );
        assert_eq!(status, SessionStatus::Empty);
        assert!(c.card().current_item.is_none());
        assert_eq!(c.reveal(), Err(PracticeError::EmptySessionPool));
        assert_eq!(c.restart_session(), Err(PracticeError::EmptySessionPool));
        assert!(c
            .drain_events()
            .iter()
            .any(|e| matches!(e, PracticeEvent::SessionEmpty { .. })));
    }

    #[test]
    fn test_fixed_session_completes() {
        let mut c = controller();
        c.start_session(SessionConfig::default().with_level(LevelFilter::Level(1)), NOW);

        for expected in [SessionStatus::Active, SessionStatus::Complete] {
            c.reveal().unwrap();
            c.grade(Grade::Good, NOW).unwrap();
            assert_eq!(c.advance_to_next().unwrap(), expected);
        }

        assert!(c.card().current_item.is_none());
        assert_eq!(c.reveal(), Err(PracticeError::NoActiveCard(SessionStatus::Complete)));

        assert_eq!(c.restart_session().unwrap(), SessionStatus::Active);
        assert!(c.controls().can_reveal);
    }

    #[test]
    fn test_wrapping_session_never_completes() {
        let mut c = controller();
        let config = SessionConfig {
            level: LevelFilter::Level(1),
            end_policy: EndPolicy::Wrap,
            ..Default::default()
        };
        c.start_session(config, NOW);
        let first = current_id(&c);

        for _ in 0..2 {
            c.reveal().unwrap();
            c.grade(Grade::Easy, NOW).unwrap();
            assert_eq!(c.advance_to_next().unwrap(), SessionStatus::Active);
        }
        assert_eq!(current_id(&c), first);
        assert_eq!(c.queue().unwrap().laps(), 1);
    }

    #[test]
    fn test_change_level_discards_card() {
        let mut c = controller();
        c.start_session(SessionConfig::default(), NOW);
        c.reveal().unwrap();

        assert_eq!(c.change_level(LevelFilter::Level(2), NOW), SessionStatus::Active);
        assert_eq!(c.card().phase, CardPhase::Hidden);
        assert_eq!(current_id(&c), "hsk2-C");
        assert_eq!(c.stats().total_studied, 0);
    }

    #[test]
    fn test_due_only_after_grading_everything() {
        let mut c = controller();
        c.start_session(SessionConfig::default().with_level(LevelFilter::Level(1)), NOW);
        for _ in 0..2 {
            c.reveal().unwrap();
            c.grade(Grade::Good, NOW).unwrap();
            c.advance_to_next().unwrap();
        }

        assert_eq!(c.change_mode(SessionMode::DueOnly, NOW), SessionStatus::Empty);
        assert_eq!(
            c.change_mode(SessionMode::DueOnly, NOW + DAY_MS),
            SessionStatus::Active
        );
    }

    #[test]
    fn test_persistence_failure_does_not_block() {
        let mut c = PracticeController::new(pool(), ReadOnlyStore::default())
            .with_sequencer(SessionSequencer::with_seed(3));
        assert!(c.drain_events().iter().any(|e| matches!(
            e,
            PracticeEvent::Warning {
                warning: PracticeWarning::StatsUnavailable { .. }
            }
        )));

        c.start_session(SessionConfig::default(), NOW);
        c.reveal().unwrap();
        let outcome = c.grade(Grade::Again, NOW).unwrap();

        assert_eq!(outcome.warnings.len(), 2);
        assert!(matches!(
            outcome.warnings[0],
            PracticeWarning::ReviewNotSaved { .. }
        ));
        assert!(matches!(
            outcome.warnings[1],
            PracticeWarning::StatsNotSaved { .. }
        ));
        assert_eq!(c.stats().wrong_answers, 1);
        assert_eq!(c.card().phase, CardPhase::Graded);
        assert_eq!(c.advance_to_next().unwrap(), SessionStatus::Active);
    }

    #[test]
    fn test_stats_restored_and_reset() {
        let mut store = MemoryStore::new();
        store
            .save(&StatsSnapshot {
                total_studied: 5,
                correct_answers: 4,
                wrong_answers: 1,
                current_streak: 4,
                best_streak: 4,
            })
            .unwrap();

        let mut c = PracticeController::new(pool(), store);
        assert_eq!(c.stats().total_studied, 5);

        assert!(c.reset_stats().is_empty());
        assert_eq!(c.stats(), StatsSnapshot::default());
        assert_eq!(c.store().load().unwrap(), Some(StatsSnapshot::default()));
    }

    #[test]
    fn test_event_order_for_one_card() {
        let mut c = controller();
        c.start_session(SessionConfig::default(), NOW);
        c.reveal().unwrap();
        c.grade(Grade::Good, NOW).unwrap();

        let kinds: Vec<&'static str> = c
            .drain_events()
            .iter()
            .map(|e| match e {
                PracticeEvent::SessionStarted { .. } => "started",
                PracticeEvent::CardShown { .. } => "shown",
                PracticeEvent::CardRevealed { .. } => "revealed",
                PracticeEvent::CardGraded { .. } => "graded",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["started", "shown", "revealed", "graded"]);
        assert!(c.drain_events().is_empty());
    }
}
