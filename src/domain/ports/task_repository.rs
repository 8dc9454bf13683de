use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{StatusCounts, Task, TaskStatus};

/// Filters for querying tasks
#[derive(Default, Debug, Clone)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    /// Only subtasks of this parent
    pub parent_id: Option<Uuid>,
    /// Exclude subtasks
    pub main_only: bool,
    pub focus_only: bool,
    pub limit: Option<usize>,
}

impl TaskFilter {
    pub fn main_tasks() -> Self {
        Self {
            main_only: true,
            ..Default::default()
        }
    }
}

/// Repository port for task persistence operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task
    async fn create(&self, task: &Task) -> DomainResult<()>;

    /// Insert several tasks atomically, in order; on failure none are kept
    async fn create_all(&self, tasks: &[Task]) -> DomainResult<()>;

    /// Get a task by ID
    async fn get(&self, id: Uuid) -> DomainResult<Option<Task>>;

    /// Overwrite an existing task
    async fn update(&self, task: &Task) -> DomainResult<()>;

    /// Delete a task; its subtasks go with it
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// List tasks. Rated tasks come back by score descending, subtasks by
    /// position, everything else newest first.
    async fn list(&self, filter: TaskFilter) -> DomainResult<Vec<Task>>;

    /// Subtasks of a parent in position order
    async fn get_subtasks(&self, parent_id: Uuid) -> DomainResult<Vec<Task>>;

    async fn count_subtasks(&self, parent_id: Uuid) -> DomainResult<u64>;

    /// Highest sibling position under a parent, if it has any subtasks
    async fn max_subtask_position(&self, parent_id: Uuid) -> DomainResult<Option<i32>>;

    /// Per-status totals over main tasks
    async fn count_by_status(&self) -> DomainResult<StatusCounts>;
}
