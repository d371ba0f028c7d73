//! Scheduling properties across many review histories

use hsk_core::srs::{Grade, ReviewScheduler, ReviewState, SchedulerConfig, DAY_MS, MIN_EASE};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const NOW: i64 = 1704067200000; // 2024-01-01 00:00:00 UTC

/// Replay a sequence of grades, one review per scheduled due date
fn replay(scheduler: &ReviewScheduler, grades: &[Grade]) -> Vec<ReviewState> {
    let mut state: Option<ReviewState> = None;
    let mut now = NOW;
    let mut history = Vec::new();
    for grade in grades {
        let next = scheduler.calculate_next_review(state.as_ref(), *grade, now);
        now = next.due_at;
        history.push(next.clone());
        state = Some(next);
    }
    history
}

fn random_history(rng: &mut StdRng, len: usize) -> Vec<Grade> {
    (0..len)
        .map(|_| *Grade::ALL.choose(rng).unwrap())
        .collect()
}

#[test]
fn test_again_always_resets() {
    let scheduler = ReviewScheduler::new();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let mut grades = random_history(&mut rng, 12);
        grades.push(Grade::Again);
        let last = replay(&scheduler, &grades).pop().unwrap();

        assert_eq!(last.repetitions, 0);
        assert_eq!(last.interval_days, 1);
    }
}

#[test]
fn test_ease_stays_in_bounds() {
    let scheduler = ReviewScheduler::new();
    let max_ease = scheduler.config().max_ease;
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let grades = random_history(&mut rng, 20);
        for state in replay(&scheduler, &grades) {
            assert!(state.ease_factor >= MIN_EASE, "ease {}", state.ease_factor);
            assert!(state.ease_factor <= max_ease, "ease {}", state.ease_factor);
        }
    }
}

#[test]
fn test_interval_non_decreasing_across_successes() {
    let scheduler = ReviewScheduler::new();
    let mut rng = StdRng::seed_from_u64(99);
    let successes = [Grade::Hard, Grade::Good, Grade::Easy];

    for _ in 0..200 {
        let grades: Vec<Grade> = (0..15)
            .map(|_| *successes.choose(&mut rng).unwrap())
            .collect();
        let history = replay(&scheduler, &grades);

        for pair in history.windows(2) {
            assert!(
                pair[1].interval_days >= pair[0].interval_days,
                "{} -> {}",
                pair[0].interval_days,
                pair[1].interval_days
            );
        }
    }
}

#[test]
fn test_repeated_hard_grades_still_grow() {
    let scheduler = ReviewScheduler::new();
    let history = replay(&scheduler, &[Grade::Hard; 10]);

    assert!(history.iter().all(|s| s.ease_factor >= MIN_EASE));
    assert!(history[9].interval_days > history[1].interval_days);
}

#[test]
fn test_new_item_good() {
    let state = ReviewScheduler::new().calculate_next_review(None, Grade::Good, NOW);

    assert_eq!(state.repetitions, 1);
    assert_eq!(state.interval_days, 1);
    assert_eq!(state.due_at, NOW + DAY_MS);
    assert_eq!(state.last_reviewed_at, Some(NOW));
}

#[test]
fn test_interval_cap() {
    let config = SchedulerConfig {
        max_interval_days: 30,
        ..Default::default()
    };
    let scheduler = ReviewScheduler::with_config(config).unwrap();
    let history = replay(&scheduler, &[Grade::Easy; 12]);

    assert_eq!(history.last().unwrap().interval_days, 30);
}
