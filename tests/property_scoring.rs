use proptest::prelude::*;
use taskdeck::domain::models::{Ratings, Task, TaskStatus};
use taskdeck::services::{can_transition, ScoringEngine};
use uuid::Uuid;

fn rating() -> impl Strategy<Value = Option<i32>> {
    prop::option::of(0..=10i32)
}

fn status() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(TaskStatus::ALL.to_vec())
}

fn task_with(energy: Option<i32>, simplicity: Option<i32>, impact: Option<i32>, status: TaskStatus) -> Task {
    let mut task = Task::new("property").with_status(status);
    task.energy = energy;
    task.simplicity = simplicity;
    task.impact = impact;
    task
}

proptest! {
    /// Running the engine a second time changes nothing.
    #[test]
    fn prop_engine_is_idempotent(
        energy in rating(),
        simplicity in rating(),
        impact in rating(),
        status in status(),
    ) {
        let engine = ScoringEngine::new();
        let mut task = task_with(energy, simplicity, impact, status);

        engine.apply(&mut task);
        let once = task.clone();
        let changed = engine.apply(&mut task);

        prop_assert!(!changed);
        prop_assert_eq!(task, once);
    }

    /// A main task has a score exactly when all three ratings are present.
    #[test]
    fn prop_score_presence_law(
        energy in rating(),
        simplicity in rating(),
        impact in rating(),
        status in status(),
    ) {
        let engine = ScoringEngine::new();
        let mut task = task_with(energy, simplicity, impact, status);
        engine.apply(&mut task);

        let complete = energy.is_some() && simplicity.is_some() && impact.is_some();
        prop_assert_eq!(task.score.is_some(), complete);
        if complete {
            prop_assert_ne!(task.status, TaskStatus::Unrated);
        } else {
            prop_assert_ne!(task.status, TaskStatus::Rated);
        }
    }

    /// Scores stay within the rating scale and carry at most two decimals.
    #[test]
    fn prop_score_in_range(energy in 0..=10i32, simplicity in 0..=10i32, impact in 0..=10i32) {
        let score = ScoringEngine::new()
            .score(&Ratings::new(energy, simplicity, impact))
            .unwrap();

        prop_assert!((0.0..=10.0).contains(&score));
        let cents = score * 100.0;
        prop_assert!((cents - cents.round()).abs() < 1e-6);
    }

    /// Subtasks are never scored.
    #[test]
    fn prop_subtasks_unscored(energy in rating(), simplicity in rating(), impact in rating()) {
        let mut task = task_with(energy, simplicity, impact, TaskStatus::Unrated).with_parent(Uuid::new_v4());
        ScoringEngine::new().apply(&mut task);
        prop_assert_eq!(task.score, None);
    }

    /// Staying in the same lane is always allowed; a rated task never goes back to unrated.
    #[test]
    fn prop_transition_table_invariants(from in status(), to in status(), has_all in any::<bool>()) {
        if from == to {
            prop_assert!(can_transition(from, to, has_all));
        }
        if from == TaskStatus::Rated && to == TaskStatus::Unrated {
            prop_assert!(!can_transition(from, to, has_all));
        }
        if to == TaskStatus::Parked || to == TaskStatus::Completed {
            prop_assert!(can_transition(from, to, has_all));
        }
    }
}
