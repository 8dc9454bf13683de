//! End-to-end task service behaviour against a migrated SQLite database.

mod common;

use common::setup_service;
use taskdeck::domain::errors::{DenialReason, DomainError};
use taskdeck::domain::models::{TaskPatch, TaskStatus};
use taskdeck::domain::ports::TaskFilter;

#[tokio::test]
async fn test_json_patch_round_trip_through_service() {
    let service = setup_service().await;

    let attrs: TaskPatch =
        serde_json::from_str(r#"{"title": "Write essay", "energy": 4, "simplicity": 6, "impact": 8}"#).unwrap();
    let created = service.create_task(attrs).await.unwrap();
    assert_eq!(created.task.status, TaskStatus::Rated);
    assert_eq!(created.task.score, Some(6.6));

    // Explicit null clears; missing keys are untouched.
    let patch: TaskPatch = serde_json::from_str(r#"{"impact": null, "notes": "draft"}"#).unwrap();
    let updated = service.update_task(created.task.id, patch).await.unwrap();

    assert_eq!(updated.task.status, TaskStatus::Unrated);
    assert_eq!(updated.task.score, None);
    assert_eq!(updated.task.energy, Some(4));
    assert_eq!(updated.task.notes.as_deref(), Some("draft"));
    assert_eq!(updated.counts.unrated_count, 1);
    assert_eq!(updated.counts.rated_count, 0);
}

#[tokio::test]
async fn test_update_outcome_serializes_counts_contract() {
    let service = setup_service().await;
    let outcome = service.create_task(TaskPatch::titled("Inbox zero")).await.unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["task"]["title"], "Inbox zero");
    assert_eq!(json["task"]["status"], "unrated");
    assert_eq!(json["counts"]["unrated_count"], 1);
    assert_eq!(json["counts"]["rated_count"], 0);
    assert_eq!(json["counts"]["parked_count"], 0);
    assert_eq!(json["counts"]["completed_count"], 0);
}

#[tokio::test]
async fn test_sticky_rating() {
    let service = setup_service().await;
    let task = service
        .create_task(TaskPatch::ratings(Some(5), Some(5), Some(5)))
        .await;
    // A patch without a title is blank and refused.
    assert!(matches!(task, Err(DomainError::ValidationFailed(_))));

    let mut attrs = TaskPatch::ratings(Some(5), Some(5), Some(5));
    attrs.title = Some("Rated".into());
    let task = service.create_task(attrs).await.unwrap().task;

    let err = service.move_task(task.id, TaskStatus::Unrated).await.unwrap_err();
    match err {
        DomainError::TransitionDenied(denied) => assert_eq!(denied.reason, DenialReason::Forbidden),
        other => panic!("expected denial, got {other:?}"),
    }

    let unchanged = service.get_task(task.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, TaskStatus::Rated);
}

#[tokio::test]
async fn test_self_parent_is_rejected() {
    let service = setup_service().await;
    let task = service.create_task(TaskPatch::titled("A")).await.unwrap().task;

    let patch = TaskPatch {
        parent_task_id: Some(Some(task.id)),
        ..Default::default()
    };
    let err = service.update_task(task.id, patch).await.unwrap_err();
    match err {
        DomainError::ValidationFailed(errors) => assert!(errors.has("parent_task_id")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_no_grandchildren() {
    let service = setup_service().await;
    let a = service.create_task(TaskPatch::titled("A")).await.unwrap().task;
    let b = service.create_subtask(a.id, "B").await.unwrap().task;
    let c = service.create_task(TaskPatch::titled("C")).await.unwrap().task;

    let patch = TaskPatch {
        parent_task_id: Some(Some(b.id)),
        ..Default::default()
    };
    let err = service.update_task(c.id, patch).await.unwrap_err();
    match err {
        DomainError::ValidationFailed(errors) => {
            assert_eq!(
                errors.on("parent_task_id"),
                vec!["can't be a subtask (subtasks can't have subtasks)"]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // A task with its own subtasks can't be nested either.
    let patch = TaskPatch {
        parent_task_id: Some(Some(c.id)),
        ..Default::default()
    };
    assert!(service.update_task(a.id, patch).await.is_err());
}

#[tokio::test]
async fn test_subtask_never_scored_even_with_ratings() {
    let service = setup_service().await;
    let parent = service.create_task(TaskPatch::titled("Parent")).await.unwrap().task;
    let sub = service.create_subtask(parent.id, "Child").await.unwrap().task;

    let updated = service
        .update_task(sub.id, TaskPatch::ratings(Some(9), Some(9), Some(9)))
        .await
        .unwrap();
    assert_eq!(updated.task.score, None);
    assert_eq!(updated.task.status, TaskStatus::Unrated);
    // Subtasks are not part of the lane totals.
    assert_eq!(updated.counts.total(), 1);
}

#[tokio::test]
async fn test_focus_and_status_filters() {
    let service = setup_service().await;

    let mut focus = TaskPatch::titled("Focus");
    focus.is_focus_task = Some(true);
    service.create_task(focus).await.unwrap();
    let parked = service.create_task(TaskPatch::titled("Later")).await.unwrap().task;
    service.move_task(parked.id, TaskStatus::Parked).await.unwrap();

    let focused = service
        .list_tasks(TaskFilter {
            focus_only: true,
            ..TaskFilter::main_tasks()
        })
        .await
        .unwrap();
    assert_eq!(focused.len(), 1);
    assert_eq!(focused[0].title, "Focus");

    let parked_only = service
        .list_tasks(TaskFilter {
            status: Some(TaskStatus::Parked),
            ..TaskFilter::main_tasks()
        })
        .await
        .unwrap();
    assert_eq!(parked_only.len(), 1);
    assert_eq!(parked_only[0].id, parked.id);
}

#[tokio::test]
async fn test_brain_dump_trims_and_skips_blank_lines() {
    let service = setup_service().await;
    let text = "  first  \n\nsecond\n   \nthird\n";

    let report = service.brain_dump(text).await.unwrap();
    let titles: Vec<&str> = report.created.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
    assert!(report.failed.is_empty());
    assert_eq!(report.counts.unrated_count, 3);

    assert!(matches!(service.brain_dump(" \n\t\n").await, Err(DomainError::EmptyBrainDump)));
}

#[tokio::test]
async fn test_explicit_initial_status_is_checked() {
    let service = setup_service().await;

    let mut attrs = TaskPatch::titled("Straight to rated");
    attrs.status = Some("rated".into());
    let err = service.create_task(attrs).await.unwrap_err();
    assert!(matches!(err, DomainError::TransitionDenied(_)));

    let mut attrs = TaskPatch::titled("Someday");
    attrs.status = Some("parked".into());
    let created = service.create_task(attrs).await.unwrap();
    assert_eq!(created.task.status, TaskStatus::Parked);
    assert_eq!(created.counts.parked_count, 1);
}
