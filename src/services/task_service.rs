//! Task service implementing every dashboard mutation and read.

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult, ValidationErrors};
use crate::domain::models::{StatusCounts, Task, TaskPatch, TaskStatus};
use crate::domain::ports::{TaskFilter, TaskRepository};
use crate::services::scoring_engine::ScoringEngine;
use crate::services::subtask_integrity::{check_parent_assignment, load_lineage};
use crate::services::transition_validator::{check_transition, restore_target};

/// A saved task together with the fresh lane totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskUpdateOutcome {
    pub task: Task,
    pub counts: StatusCounts,
}

/// Everything needed to put a deleted task back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeletedTask {
    pub task: Task,
    pub subtasks: Vec<Task>,
    pub counts: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrainDumpFailure {
    pub title: String,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrainDumpReport {
    pub created: Vec<Task>,
    pub failed: Vec<BrainDumpFailure>,
    pub counts: StatusCounts,
}

pub struct TaskService<R: TaskRepository> {
    repo: Arc<R>,
    engine: ScoringEngine,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            engine: ScoringEngine::new(),
        }
    }

    /// Create with a custom scoring engine.
    pub fn with_engine(mut self, engine: ScoringEngine) -> Self {
        self.engine = engine;
        self
    }

    pub async fn get_task(&self, id: Uuid) -> DomainResult<Option<Task>> {
        self.repo.get(id).await
    }

    pub async fn list_tasks(&self, filter: TaskFilter) -> DomainResult<Vec<Task>> {
        let tasks = self.repo.list(filter).await?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    pub async fn list_subtasks(&self, parent_id: Uuid) -> DomainResult<Vec<Task>> {
        self.require(parent_id).await?;
        self.repo.get_subtasks(parent_id).await
    }

    pub async fn status_counts(&self) -> DomainResult<StatusCounts> {
        self.repo.count_by_status().await
    }

    /// Create a task from partial attributes. Missing fields take the
    /// defaults of a fresh unrated task.
    #[instrument(skip(self, attributes))]
    pub async fn create_task(&self, attributes: TaskPatch) -> DomainResult<TaskUpdateOutcome> {
        let task = self.insert(&attributes).await?;
        info!(task_id = %task.id, status = %task.status, "task created");
        self.outcome(task).await
    }

    /// Apply a partial update. A status change must pass the transition
    /// table, judged on the ratings the task will have after the update.
    #[instrument(skip(self, patch), fields(task_id = %id))]
    pub async fn update_task(&self, id: Uuid, patch: TaskPatch) -> DomainResult<TaskUpdateOutcome> {
        let current = self.require(id).await?;
        let task = self.prepare(&current, &patch).await?;
        self.repo.update(&task).await?;

        info!(
            from = %current.status,
            to = %task.status,
            score = ?task.score,
            "task updated"
        );
        self.outcome(task).await
    }

    /// Move a task to another lane.
    pub async fn move_task(&self, id: Uuid, target: TaskStatus) -> DomainResult<TaskUpdateOutcome> {
        self.update_task(id, TaskPatch::status(target)).await
    }

    /// Take a parked or completed task back to the lane its ratings allow.
    pub async fn reopen_task(&self, id: Uuid) -> DomainResult<TaskUpdateOutcome> {
        let task = self.require(id).await?;
        self.move_task(id, restore_target(task.has_all_ratings())).await
    }

    /// Delete a task and its subtasks, returning a snapshot for undo.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: Uuid) -> DomainResult<DeletedTask> {
        let task = self.require(id).await?;
        let subtasks = self.repo.get_subtasks(id).await?;
        self.repo.delete(id).await?;
        let counts = self.repo.count_by_status().await?;

        info!(subtasks = subtasks.len(), "task deleted");
        Ok(DeletedTask { task, subtasks, counts })
    }

    /// Put a deleted task back with its original id and subtasks.
    ///
    /// Everything is validated before the first write, and the rows go in
    /// as one transaction.
    #[instrument(skip(self, deleted), fields(task_id = %deleted.task.id))]
    pub async fn restore_task(&self, deleted: &DeletedTask) -> DomainResult<TaskUpdateOutcome> {
        let mut task = deleted.task.clone();
        self.ensure_id_free(task.id).await?;
        task.validate().into_result()?;
        if let Some(parent_id) = task.parent_task_id {
            self.check_parent(task.id, parent_id).await?;
        }
        self.engine.apply(&mut task);
        task.updated_at = Utc::now();

        let mut rows = Vec::with_capacity(deleted.subtasks.len() + 1);
        rows.push(task.clone());
        for subtask in &deleted.subtasks {
            let mut subtask = subtask.clone();
            self.ensure_id_free(subtask.id).await?;
            subtask.validate().into_result()?;
            self.engine.apply(&mut subtask);
            rows.push(subtask);
        }
        self.repo.create_all(&rows).await?;

        info!(subtasks = deleted.subtasks.len(), "task restored");
        self.outcome(task).await
    }

    /// Copy a task under a new id. Subtasks are not copied.
    pub async fn duplicate_task(&self, id: Uuid) -> DomainResult<TaskUpdateOutcome> {
        let source = self.require(id).await?;
        let now = Utc::now();
        let mut copy = Task {
            id: Uuid::new_v4(),
            title: format!("{} (Copy)", source.title),
            created_at: now,
            updated_at: now,
            ..source.clone()
        };
        if let Some(parent_id) = copy.parent_task_id {
            copy.position = self.next_position(parent_id).await?;
        }

        copy.validate().into_result()?;
        self.engine.apply(&mut copy);
        self.repo.create(&copy).await?;

        info!(source_id = %id, task_id = %copy.id, "task duplicated");
        self.outcome(copy).await
    }

    /// Create one unrated task per non-blank line of `text`.
    #[instrument(skip(self, text))]
    pub async fn brain_dump(&self, text: &str) -> DomainResult<BrainDumpReport> {
        if text.trim().is_empty() {
            return Err(DomainError::EmptyBrainDump);
        }

        let mut created = Vec::new();
        let mut failed = Vec::new();

        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            match self.insert(&TaskPatch::titled(line)).await {
                Ok(task) => created.push(task),
                Err(DomainError::ValidationFailed(errors)) => failed.push(BrainDumpFailure {
                    title: line.to_string(),
                    errors: errors.full_messages(),
                }),
                Err(other) => return Err(other),
            }
        }

        info!(created = created.len(), failed = failed.len(), "brain dump processed");
        let counts = self.repo.count_by_status().await?;
        Ok(BrainDumpReport { created, failed, counts })
    }

    /// Add a checklist item under a main task, after its current last item.
    pub async fn create_subtask(&self, parent_id: Uuid, title: &str) -> DomainResult<TaskUpdateOutcome> {
        self.require(parent_id).await?;
        let attributes = TaskPatch {
            title: Some(title.to_string()),
            parent_task_id: Some(Some(parent_id)),
            ..Default::default()
        };
        let task = self.insert(&attributes).await?;

        info!(parent_id = %parent_id, task_id = %task.id, position = task.position, "subtask created");
        self.outcome(task).await
    }

    /// Flip a subtask between unrated and completed.
    pub async fn toggle_subtask(&self, id: Uuid) -> DomainResult<TaskUpdateOutcome> {
        let task = self.require(id).await?;
        if !task.is_subtask() {
            return Err(DomainError::NotASubtask(id));
        }
        let target = if task.status == TaskStatus::Completed {
            TaskStatus::Unrated
        } else {
            TaskStatus::Completed
        };
        self.move_task(id, target).await
    }

    /// Promote a subtask to a main task in `target` (unrated by default).
    /// Its ratings are cleared, so `rated` is refused.
    pub async fn convert_to_main_task(
        &self,
        id: Uuid,
        target: Option<TaskStatus>,
    ) -> DomainResult<TaskUpdateOutcome> {
        let task = self.require(id).await?;
        if !task.is_subtask() {
            return Err(DomainError::NotASubtask(id));
        }
        let patch = TaskPatch {
            status: Some(target.unwrap_or(TaskStatus::Unrated).as_str().to_string()),
            energy: Some(None),
            simplicity: Some(None),
            impact: Some(None),
            parent_task_id: Some(None),
            ..Default::default()
        };
        self.update_task(id, patch).await
    }

    async fn require(&self, id: Uuid) -> DomainResult<Task> {
        self.repo.get(id).await?.ok_or(DomainError::TaskNotFound(id))
    }

    async fn ensure_id_free(&self, id: Uuid) -> DomainResult<()> {
        if self.repo.get(id).await?.is_some() {
            return Err(ValidationErrors::single("id", "has already been taken").into());
        }
        Ok(())
    }

    async fn outcome(&self, task: Task) -> DomainResult<TaskUpdateOutcome> {
        let counts = self.repo.count_by_status().await?;
        Ok(TaskUpdateOutcome { task, counts })
    }

    async fn insert(&self, attributes: &TaskPatch) -> DomainResult<Task> {
        let task = self.prepare(&Task::new(""), attributes).await?;
        self.repo.create(&task).await?;
        Ok(task)
    }

    /// Build the post-update task: apply the patch, validate, check the
    /// status move and parent assignment, then score. Nothing is saved here.
    async fn prepare(&self, current: &Task, patch: &TaskPatch) -> DomainResult<Task> {
        let mut errors = ValidationErrors::new();
        let requested_status = match patch.status.as_deref() {
            Some(raw) => {
                let parsed = TaskStatus::from_str(raw);
                if parsed.is_none() {
                    errors.add("status", "is not included in the list");
                }
                parsed
            }
            None => None,
        };

        let mut task = current.clone();
        patch.apply_fields(&mut task);
        if let Some(target) = requested_status {
            task.status = target;
        }

        errors.merge(task.validate());
        errors.into_result()?;

        // Subtasks are unscored checklist items; `validate` already limits
        // them to unrated or completed.
        if let Some(target) = requested_status.filter(|_| !task.is_subtask()) {
            check_transition(current.status, target, &task.ratings())?;
        }

        if task.parent_task_id != current.parent_task_id {
            match task.parent_task_id {
                Some(parent_id) => {
                    self.check_parent(task.id, parent_id).await?;
                    task.position = self.next_position(parent_id).await?;
                }
                None => task.position = 0,
            }
        }

        self.engine.apply(&mut task);
        task.updated_at = Utc::now();
        Ok(task)
    }

    async fn check_parent(&self, task_id: Uuid, parent_id: Uuid) -> DomainResult<()> {
        let lineage = load_lineage(self.repo.as_ref(), parent_id).await?;
        let has_subtasks = self.repo.count_subtasks(task_id).await? > 0;
        check_parent_assignment(task_id, parent_id, &lineage, has_subtasks)?;
        Ok(())
    }

    /// The first subtask sits at 0; later ones follow the current last.
    async fn next_position(&self, parent_id: Uuid) -> DomainResult<i32> {
        Ok(self.repo.max_subtask_position(parent_id).await?.map_or(0, |max| max + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteTaskRepository};
    use crate::domain::errors::DenialReason;
    use crate::domain::models::RatingField;

    async fn setup_service() -> TaskService<SqliteTaskRepository> {
        let pool = create_migrated_test_pool().await.unwrap();
        TaskService::new(Arc::new(SqliteTaskRepository::new(pool)))
    }

    fn rated(title: &str, energy: i32, simplicity: i32, impact: i32) -> TaskPatch {
        TaskPatch {
            title: Some(title.to_string()),
            ..TaskPatch::ratings(Some(energy), Some(simplicity), Some(impact))
        }
    }

    fn validation_errors(result: DomainResult<TaskUpdateOutcome>) -> ValidationErrors {
        match result {
            Err(DomainError::ValidationFailed(errors)) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_unrated_defaults() {
        let service = setup_service().await;
        let outcome = service.create_task(TaskPatch::titled("Inbox zero")).await.unwrap();

        assert_eq!(outcome.task.status, TaskStatus::Unrated);
        assert_eq!(outcome.task.cognitive_density, 0);
        assert!(outcome.task.score.is_none());
        assert_eq!(outcome.counts.unrated_count, 1);
    }

    #[tokio::test]
    async fn test_create_with_ratings_is_scored() {
        let service = setup_service().await;
        let outcome = service.create_task(rated("Write essay", 4, 6, 8)).await.unwrap();

        assert_eq!(outcome.task.status, TaskStatus::Rated);
        assert!((outcome.task.score.unwrap() - 6.6).abs() < 1e-9);
        assert_eq!(outcome.counts.rated_count, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title_and_unknown_status() {
        let service = setup_service().await;
        let attributes = TaskPatch {
            title: Some("   ".into()),
            status: Some("archived".into()),
            ..Default::default()
        };

        let errors = validation_errors(service.create_task(attributes).await);
        assert!(errors.full_messages().contains(&"Title can't be blank".to_string()));
        assert_eq!(errors.on("status"), vec!["is not included in the list"]);
        assert_eq!(service.status_counts().await.unwrap().total(), 0);
    }

    #[tokio::test]
    async fn test_clearing_a_rating_demotes() {
        let service = setup_service().await;
        let task = service.create_task(rated("Taxes", 5, 5, 5)).await.unwrap().task;

        let patch = TaskPatch {
            impact: Some(None),
            ..Default::default()
        };
        let outcome = service.update_task(task.id, patch).await.unwrap();

        assert_eq!(outcome.task.status, TaskStatus::Unrated);
        assert!(outcome.task.score.is_none());
        assert_eq!(outcome.counts.rated_count, 0);
        assert_eq!(outcome.counts.unrated_count, 1);
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_not_saved() {
        let service = setup_service().await;
        let task = service.create_task(TaskPatch::titled("Gym")).await.unwrap().task;

        let errors = validation_errors(service.update_task(task.id, TaskPatch::ratings(Some(11), None, None)).await);
        assert_eq!(errors.full_messages(), vec!["Energy must be less than or equal to 10"]);

        let stored = service.get_task(task.id).await.unwrap().unwrap();
        assert_eq!(stored.energy, None);
    }

    #[tokio::test]
    async fn test_rated_cannot_move_back_to_unrated() {
        let service = setup_service().await;
        let task = service.create_task(rated("Sticky", 1, 2, 3)).await.unwrap().task;

        let err = service.move_task(task.id, TaskStatus::Unrated).await.unwrap_err();
        match err {
            DomainError::TransitionDenied(denied) => assert_eq!(denied.reason, DenialReason::Forbidden),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rating_required_before_rated() {
        let service = setup_service().await;
        let task = service.create_task(TaskPatch::titled("Half")).await.unwrap().task;

        let err = service.move_task(task.id, TaskStatus::Rated).await.unwrap_err();
        match err {
            DomainError::TransitionDenied(denied) => assert_eq!(
                denied.reason,
                DenialReason::MissingRatings {
                    missing: vec![RatingField::Energy, RatingField::Simplicity, RatingField::Impact]
                }
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_park_and_reopen_returns_to_rated() {
        let service = setup_service().await;
        let task = service.create_task(rated("Later", 2, 2, 2)).await.unwrap().task;

        let parked = service.move_task(task.id, TaskStatus::Parked).await.unwrap();
        assert_eq!(parked.task.status, TaskStatus::Parked);
        assert_eq!(parked.counts.parked_count, 1);
        assert!(parked.task.score.is_some());

        let reopened = service.reopen_task(task.id).await.unwrap();
        assert_eq!(reopened.task.status, TaskStatus::Rated);
    }

    #[tokio::test]
    async fn test_subtasks_are_ordered_and_uncounted() {
        let service = setup_service().await;
        let parent = service.create_task(TaskPatch::titled("Move house")).await.unwrap().task;

        let first = service.create_subtask(parent.id, "Pack books").await.unwrap();
        let second = service.create_subtask(parent.id, "Call movers").await.unwrap();
        assert_eq!(first.task.position, 0);
        assert_eq!(second.task.position, 1);
        assert_eq!(second.counts.total(), 1);

        let titles: Vec<String> = service
            .list_subtasks(parent.id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Pack books", "Call movers"]);
    }

    #[tokio::test]
    async fn test_subtask_rules() {
        let service = setup_service().await;
        let parent = service.create_task(TaskPatch::titled("Parent")).await.unwrap().task;
        let child = service.create_subtask(parent.id, "Child").await.unwrap().task;

        let errors = validation_errors(service.create_subtask(child.id, "Grandchild").await);
        assert!(errors.has("parent_task_id"));

        let errors = validation_errors(service.create_subtask(parent.id, " ").await);
        assert_eq!(errors.full_messages(), vec!["Title can't be blank"]);

        let self_parent = TaskPatch {
            parent_task_id: Some(Some(parent.id)),
            ..Default::default()
        };
        let errors = validation_errors(service.update_task(parent.id, self_parent).await);
        assert_eq!(errors.on("parent_task_id"), vec!["can't reference the task itself"]);

        // A task that already has subtasks can't be nested under another one.
        let other = service.create_task(TaskPatch::titled("Other")).await.unwrap().task;
        let nest = TaskPatch {
            parent_task_id: Some(Some(other.id)),
            ..Default::default()
        };
        let errors = validation_errors(service.update_task(parent.id, nest).await);
        assert!(errors.has("parent_task_id"));
    }

    #[tokio::test]
    async fn test_toggle_subtask() {
        let service = setup_service().await;
        let parent = service.create_task(TaskPatch::titled("Trip")).await.unwrap().task;
        let child = service.create_subtask(parent.id, "Passport").await.unwrap().task;

        let done = service.toggle_subtask(child.id).await.unwrap();
        assert_eq!(done.task.status, TaskStatus::Completed);
        let undone = service.toggle_subtask(child.id).await.unwrap();
        assert_eq!(undone.task.status, TaskStatus::Unrated);

        assert!(matches!(
            service.toggle_subtask(parent.id).await,
            Err(DomainError::NotASubtask(id)) if id == parent.id
        ));
    }

    #[tokio::test]
    async fn test_toggle_subtask_holding_ratings() {
        let service = setup_service().await;
        let parent = service.create_task(TaskPatch::titled("Move house")).await.unwrap().task;
        let child = service.create_subtask(parent.id, "Book van").await.unwrap().task;
        service
            .update_task(child.id, TaskPatch::ratings(Some(1), Some(2), Some(3)))
            .await
            .unwrap();

        let done = service.toggle_subtask(child.id).await.unwrap();
        assert_eq!(done.task.status, TaskStatus::Completed);
        let undone = service.toggle_subtask(child.id).await.unwrap();
        assert_eq!(undone.task.status, TaskStatus::Unrated);
        assert_eq!(undone.task.energy, Some(1));
        assert!(undone.task.score.is_none());
    }

    #[tokio::test]
    async fn test_convert_to_main_task() {
        let service = setup_service().await;
        let parent = service.create_task(TaskPatch::titled("Project")).await.unwrap().task;
        let child = service.create_subtask(parent.id, "Spin off").await.unwrap().task;

        assert!(matches!(
            service.convert_to_main_task(child.id, Some(TaskStatus::Rated)).await,
            Err(DomainError::TransitionDenied(_))
        ));

        let promoted = service.convert_to_main_task(child.id, Some(TaskStatus::Parked)).await.unwrap();
        assert!(promoted.task.parent_task_id.is_none());
        assert_eq!(promoted.task.position, 0);
        assert_eq!(promoted.task.status, TaskStatus::Parked);
        assert_eq!(promoted.counts.parked_count, 1);
    }

    #[tokio::test]
    async fn test_delete_and_restore_with_subtasks() {
        let service = setup_service().await;
        let parent = service.create_task(rated("Garden", 3, 4, 5)).await.unwrap().task;
        service.create_subtask(parent.id, "Seeds").await.unwrap();

        let deleted = service.delete_task(parent.id).await.unwrap();
        assert_eq!(deleted.subtasks.len(), 1);
        assert_eq!(deleted.counts.total(), 0);
        assert!(service.get_task(deleted.subtasks[0].id).await.unwrap().is_none());

        let restored = service.restore_task(&deleted).await.unwrap();
        assert_eq!(restored.task.id, parent.id);
        assert_eq!(restored.task.status, TaskStatus::Rated);
        assert_eq!(restored.counts.rated_count, 1);
        assert_eq!(service.list_subtasks(parent.id).await.unwrap().len(), 1);

        assert!(matches!(
            service.restore_task(&deleted).await,
            Err(DomainError::ValidationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_restore_writes_nothing_when_a_subtask_id_is_taken() {
        let pool = create_migrated_test_pool().await.unwrap();
        let repo = Arc::new(SqliteTaskRepository::new(pool));
        let service = TaskService::new(repo.clone());

        let parent = service.create_task(TaskPatch::titled("Kitchen")).await.unwrap().task;
        service.create_subtask(parent.id, "Paint").await.unwrap();
        service.create_subtask(parent.id, "Tiles").await.unwrap();
        let deleted = service.delete_task(parent.id).await.unwrap();

        let mut squatter = Task::new("Squatter");
        squatter.id = deleted.subtasks[1].id;
        repo.create(&squatter).await.unwrap();

        let errors = validation_errors(service.restore_task(&deleted).await);
        assert_eq!(errors.on("id"), vec!["has already been taken"]);
        assert!(service.get_task(parent.id).await.unwrap().is_none());
        assert!(service.get_task(deleted.subtasks[0].id).await.unwrap().is_none());
        assert_eq!(service.status_counts().await.unwrap().total(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_appends_copy() {
        let service = setup_service().await;
        let task = service.create_task(rated("Report", 1, 1, 1)).await.unwrap().task;

        let copy = service.duplicate_task(task.id).await.unwrap();
        assert_ne!(copy.task.id, task.id);
        assert_eq!(copy.task.title, "Report (Copy)");
        assert_eq!(copy.task.score, task.score);
        assert_eq!(copy.counts.rated_count, 2);
    }

    #[tokio::test]
    async fn test_brain_dump() {
        let service = setup_service().await;

        let report = service.brain_dump("  Buy milk \n\n Call mom\r\n   ").await.unwrap();
        let titles: Vec<&str> = report.created.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Buy milk", "Call mom"]);
        assert!(report.failed.is_empty());
        assert_eq!(report.counts.unrated_count, 2);

        assert!(matches!(service.brain_dump(" \n ").await, Err(DomainError::EmptyBrainDump)));
    }

    #[tokio::test]
    async fn test_rated_list_is_ordered_by_score() {
        let service = setup_service().await;
        service.create_task(rated("Low", 1, 1, 1)).await.unwrap();
        service.create_task(rated("High", 9, 9, 9)).await.unwrap();
        service.create_task(rated("Mid", 5, 5, 5)).await.unwrap();

        let filter = TaskFilter {
            status: Some(TaskStatus::Rated),
            ..TaskFilter::main_tasks()
        };
        let titles: Vec<String> = service
            .list_tasks(filter)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["High", "Mid", "Low"]);
    }

    #[tokio::test]
    async fn test_missing_task() {
        let service = setup_service().await;
        let id = Uuid::new_v4();
        assert!(matches!(
            service.update_task(id, TaskPatch::titled("x")).await,
            Err(DomainError::TaskNotFound(missing)) if missing == id
        ));
    }
}
