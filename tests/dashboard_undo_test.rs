//! Dashboard session flows: lane moves, reconciliation and undo.

mod common;

use common::setup_dashboard;
use taskdeck::application::{MoveOutcome, DEFAULT_UNDO_LIMIT};
use taskdeck::domain::errors::DenialReason;
use taskdeck::domain::models::{Ratings, TaskPatch, TaskStatus};

#[tokio::test]
async fn test_undo_stack_keeps_last_ten() {
    let mut dashboard = setup_dashboard(DEFAULT_UNDO_LIMIT).await;
    for n in 0..12 {
        dashboard.capture(&format!("Task {n}")).await.unwrap();
    }
    assert_eq!(dashboard.undo_stack().len(), 10);

    let mut undone = 0;
    while dashboard.undo().await.unwrap().is_some() {
        undone += 1;
    }
    assert_eq!(undone, 10);

    // The two oldest captures fell off the stack and stay.
    let mut titles: Vec<String> = dashboard.tasks().map(|t| t.title.clone()).collect();
    titles.sort();
    assert_eq!(titles, vec!["Task 0", "Task 1"]);
}

#[tokio::test]
async fn test_rejected_moves_leave_everything_alone() {
    let mut dashboard = setup_dashboard(10).await;
    let rated = dashboard.capture("Rated").await.unwrap();
    dashboard.rate(rated.id, Ratings::new(3, 3, 3)).await.unwrap();
    let parked = dashboard.capture("Parked").await.unwrap();
    dashboard.edit(parked.id, TaskPatch::ratings(Some(1), Some(2), Some(3))).await.unwrap();
    dashboard.park(parked.id).await.unwrap();

    let counts = dashboard.counts();
    let history = dashboard.undo_stack().len();
    let before: Vec<_> = [rated.id, parked.id]
        .iter()
        .map(|id| dashboard.task(*id).cloned())
        .collect();

    match dashboard.move_to(rated.id, TaskStatus::Unrated).await.unwrap() {
        MoveOutcome::Rejected(denied) => assert_eq!(denied.reason, DenialReason::Forbidden),
        other => panic!("expected rejection, got {other:?}"),
    }
    match dashboard.move_to(parked.id, TaskStatus::Unrated).await.unwrap() {
        MoveOutcome::Rejected(denied) => assert_eq!(denied.reason, DenialReason::RatingsLocked),
        other => panic!("expected rejection, got {other:?}"),
    }

    let after: Vec<_> = [rated.id, parked.id]
        .iter()
        .map(|id| dashboard.task(*id).cloned())
        .collect();
    assert_eq!(before, after);
    assert_eq!(dashboard.counts(), counts);
    assert_eq!(dashboard.undo_stack().len(), history);

    // Persisted state agrees with the view.
    let stored = dashboard.service().get_task(rated.id).await.unwrap().unwrap();
    assert_eq!(stored.status, TaskStatus::Rated);
}

#[tokio::test]
async fn test_reopen_completed_rated_task_goes_back_to_rated() {
    let mut dashboard = setup_dashboard(10).await;
    let task = dashboard.capture("Ship it").await.unwrap();
    dashboard.rate(task.id, Ratings::new(7, 7, 7)).await.unwrap();
    dashboard.complete(task.id).await.unwrap();

    let outcome = dashboard.reopen(task.id).await.unwrap();
    assert!(matches!(outcome, MoveOutcome::Moved(ref t) if t.status == TaskStatus::Rated));
    assert_eq!(dashboard.section(TaskStatus::Rated).len(), 1);
    assert!(dashboard.section(TaskStatus::Completed).is_empty());
}

#[tokio::test]
async fn test_undo_after_external_delete_fails_and_is_dropped() {
    let mut dashboard = setup_dashboard(10).await;
    let keep = dashboard.capture("Keep").await.unwrap();
    let task = dashboard.capture("Vanishes").await.unwrap();
    dashboard.park(task.id).await.unwrap();

    dashboard.service().delete_task(task.id).await.unwrap();
    assert_eq!(dashboard.undo_stack().len(), 3);

    // Reversing the park fails because the task is gone.
    assert!(dashboard.undo().await.is_err());
    assert_eq!(dashboard.undo_stack().len(), 2);

    // So does reversing its capture.
    assert!(dashboard.undo().await.is_err());
    assert_eq!(dashboard.undo_stack().len(), 1);

    // The remaining action still works.
    dashboard.undo().await.unwrap();
    assert!(dashboard.task(keep.id).is_none());
    assert!(dashboard.undo().await.unwrap().is_none());
}

#[tokio::test]
async fn test_refresh_picks_up_outside_changes() {
    let mut dashboard = setup_dashboard(10).await;
    dashboard.capture("Seen").await.unwrap();

    let mut attrs = TaskPatch::titled("Added elsewhere");
    attrs.status = Some("parked".into());
    dashboard.service().create_task(attrs).await.unwrap();
    assert_eq!(dashboard.tasks().count(), 1);

    dashboard.refresh().await.unwrap();
    assert_eq!(dashboard.tasks().count(), 2);
    assert_eq!(dashboard.counts().parked_count, 1);
    assert_eq!(dashboard.section(TaskStatus::Parked)[0].title, "Added elsewhere");
}

#[tokio::test]
async fn test_undo_rating_edit_that_also_set_rated() {
    let mut dashboard = setup_dashboard(10).await;
    let task = dashboard.capture("Plan sprint").await.unwrap();

    let patch = TaskPatch {
        status: Some("rated".into()),
        ..TaskPatch::ratings(Some(4), Some(6), Some(8))
    };
    let rated = dashboard.edit(task.id, patch).await.unwrap();
    assert_eq!(rated.status, TaskStatus::Rated);

    dashboard.undo().await.unwrap().unwrap();

    let restored = dashboard.task(task.id).unwrap();
    assert_eq!(restored.status, TaskStatus::Unrated);
    assert_eq!(restored.ratings(), Ratings::default());
    assert!(restored.score.is_none());
    assert_eq!(dashboard.counts().unrated_count, 1);
    assert_eq!(dashboard.undo_stack().len(), 1);
}
