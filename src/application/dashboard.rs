//! Dashboard view model.
//!
//! Holds the main tasks as one map keyed by id, the last lane totals the
//! service reported, and the undo history. Every successful request is
//! reconciled from the service's answer; nothing is guessed locally.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::undo::{UndoAction, UndoStack};
use crate::domain::errors::{DomainError, DomainResult, TransitionDenied};
use crate::domain::models::{Ratings, StatusCounts, Task, TaskPatch, TaskStatus};
use crate::domain::ports::{TaskFilter, TaskRepository};
use crate::services::{check_transition, restore_target, DeletedTask, TaskService, TaskUpdateOutcome};

/// Result of asking the dashboard to move a task between lanes.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Moved(Task),
    /// Already in the target lane
    Unchanged,
    /// Refused locally; no request was sent
    Rejected(TransitionDenied),
}

pub struct Dashboard<R: TaskRepository> {
    service: Arc<TaskService<R>>,
    tasks: HashMap<Uuid, Task>,
    counts: StatusCounts,
    undo: UndoStack,
}

impl<R: TaskRepository> Dashboard<R> {
    pub fn new(service: Arc<TaskService<R>>, undo: UndoStack) -> Self {
        Self {
            service,
            tasks: HashMap::new(),
            counts: StatusCounts::default(),
            undo,
        }
    }

    pub fn service(&self) -> &Arc<TaskService<R>> {
        &self.service
    }

    pub fn counts(&self) -> StatusCounts {
        self.counts
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    /// Main tasks in one lane, in display order: highest score first for
    /// `rated`, newest first everywhere else.
    pub fn section(&self, status: TaskStatus) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.values().filter(|t| t.status == status).collect();
        tasks.sort_by(|a, b| {
            let by_score = if status == TaskStatus::Rated {
                b.score.unwrap_or(f64::MIN).total_cmp(&a.score.unwrap_or(f64::MIN))
            } else {
                Ordering::Equal
            };
            by_score
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        tasks
    }

    pub fn add_action(&mut self, action: UndoAction) {
        debug!(kind = action.kind(), task_id = %action.task_id(), "undo action recorded");
        self.undo.push(action);
    }

    pub fn update_counters(&mut self, counts: StatusCounts) {
        self.counts = counts;
    }

    /// Reload every main task and the lane totals.
    pub async fn refresh(&mut self) -> DomainResult<()> {
        let tasks = self.service.list_tasks(TaskFilter::main_tasks()).await?;
        let counts = self.service.status_counts().await?;

        self.tasks = tasks.into_iter().map(|t| (t.id, t)).collect();
        self.update_counters(counts);
        Ok(())
    }

    /// Quick-add a task by title.
    pub async fn capture(&mut self, title: &str) -> DomainResult<Task> {
        let outcome = self.service.create_task(TaskPatch::titled(title)).await?;
        let task = self.reconcile(outcome);
        self.add_action(UndoAction::TaskCreated { task_id: task.id });
        Ok(task)
    }

    /// Apply an arbitrary field edit, remembering the prior values.
    pub async fn edit(&mut self, id: Uuid, patch: TaskPatch) -> DomainResult<Task> {
        let current = self.current(id).await?;
        let previous = patch.inverse_for(&current);

        let outcome = self.service.update_task(id, patch).await?;
        let task = self.reconcile(outcome);
        self.add_action(UndoAction::TaskEdited { task_id: id, previous });
        Ok(task)
    }

    /// Set all three ratings at once. `None` clears a rating.
    pub async fn rate(&mut self, id: Uuid, ratings: Ratings) -> DomainResult<Task> {
        self.edit(id, TaskPatch::ratings(ratings.energy, ratings.simplicity, ratings.impact))
            .await
    }

    /// Move a task to another lane after checking the transition table.
    /// A refused move sends nothing and changes nothing.
    pub async fn move_to(&mut self, id: Uuid, target: TaskStatus) -> DomainResult<MoveOutcome> {
        let current = self.current(id).await?;
        if current.status == target {
            return Ok(MoveOutcome::Unchanged);
        }
        if let Err(denied) = check_transition(current.status, target, &current.ratings()) {
            debug!(task_id = %id, reason = %denied.reason, "move rejected");
            return Ok(MoveOutcome::Rejected(denied));
        }

        let outcome = self.service.move_task(id, target).await?;
        let task = self.reconcile(outcome);
        self.add_action(UndoAction::StatusChanged {
            task_id: id,
            previous: current.status,
        });
        Ok(MoveOutcome::Moved(task))
    }

    pub async fn park(&mut self, id: Uuid) -> DomainResult<MoveOutcome> {
        self.move_to(id, TaskStatus::Parked).await
    }

    pub async fn complete(&mut self, id: Uuid) -> DomainResult<MoveOutcome> {
        self.move_to(id, TaskStatus::Completed).await
    }

    /// Send a parked or completed task back to rated or unrated.
    pub async fn reopen(&mut self, id: Uuid) -> DomainResult<MoveOutcome> {
        let current = self.current(id).await?;
        self.move_to(id, restore_target(current.has_all_ratings())).await
    }

    pub async fn delete(&mut self, id: Uuid) -> DomainResult<DeletedTask> {
        let deleted = self.service.delete_task(id).await?;
        self.tasks.remove(&id);
        self.update_counters(deleted.counts);
        self.add_action(UndoAction::TaskDeleted(Box::new(deleted.clone())));
        Ok(deleted)
    }

    pub async fn add_subtask(&mut self, parent_id: Uuid, title: &str) -> DomainResult<Task> {
        let outcome = self.service.create_subtask(parent_id, title).await?;
        let task = self.reconcile(outcome);
        self.add_action(UndoAction::SubtaskCreated { task_id: task.id });
        Ok(task)
    }

    pub async fn toggle_subtask(&mut self, id: Uuid) -> DomainResult<Task> {
        let outcome = self.service.toggle_subtask(id).await?;
        let task = self.reconcile(outcome);
        self.add_action(UndoAction::SubtaskToggled { task_id: id });
        Ok(task)
    }

    /// Reverse the most recent action.
    ///
    /// Returns the undone action, or `None` when there is nothing to undo.
    /// A failed undo is dropped, not pushed back.
    pub async fn undo(&mut self) -> DomainResult<Option<UndoAction>> {
        let Some(action) = self.undo.pop() else {
            return Ok(None);
        };

        match self.reverse(&action).await {
            Ok(()) => {
                info!(kind = action.kind(), task_id = %action.task_id(), "undo applied");
                Ok(Some(action))
            }
            Err(err) => {
                warn!(kind = action.kind(), task_id = %action.task_id(), error = %err, "undo failed");
                Err(err)
            }
        }
    }

    async fn reverse(&mut self, action: &UndoAction) -> DomainResult<()> {
        match action {
            UndoAction::TaskCreated { task_id } | UndoAction::SubtaskCreated { task_id } => {
                let deleted = self.service.delete_task(*task_id).await?;
                self.tasks.remove(task_id);
                self.update_counters(deleted.counts);
            }
            UndoAction::TaskDeleted(deleted) => {
                let outcome = self.service.restore_task(deleted).await?;
                self.reconcile(outcome);
            }
            UndoAction::TaskEdited { task_id, previous } => {
                let outcome = self.service.update_task(*task_id, previous.clone()).await?;
                self.reconcile(outcome);
            }
            UndoAction::StatusChanged { task_id, previous } => {
                let outcome = self.service.move_task(*task_id, *previous).await?;
                self.reconcile(outcome);
            }
            UndoAction::SubtaskToggled { task_id } => {
                let outcome = self.service.toggle_subtask(*task_id).await?;
                self.reconcile(outcome);
            }
        }
        Ok(())
    }

    async fn current(&self, id: Uuid) -> DomainResult<Task> {
        if let Some(task) = self.tasks.get(&id) {
            return Ok(task.clone());
        }
        self.service.get_task(id).await?.ok_or(DomainError::TaskNotFound(id))
    }

    fn reconcile(&mut self, outcome: TaskUpdateOutcome) -> Task {
        let TaskUpdateOutcome { task, counts } = outcome;
        if task.is_subtask() {
            self.tasks.remove(&task.id);
        } else {
            self.tasks.insert(task.id, task.clone());
        }
        self.update_counters(counts);
        task
    }
}
