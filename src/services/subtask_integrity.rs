//! Rules for assigning a parent to a task.
//!
//! Subtasks are one level deep: a parent must be a main task, a task
//! with subtasks of its own cannot become a subtask, and no chain may
//! loop back on itself. Every violation is reported on `parent_task_id`.

use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::errors::{DomainResult, ValidationErrors};
use crate::domain::ports::TaskRepository;

const FIELD: &str = "parent_task_id";

/// What the repository knows about a proposed parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentLineage {
    /// False when no task with the proposed id exists
    pub exists: bool,
    /// Ancestors above the proposed parent, nearest first
    pub ancestors: Vec<Uuid>,
}

/// Check assigning `parent_id` as the parent of `task_id`.
pub fn check_parent_assignment(
    task_id: Uuid,
    parent_id: Uuid,
    lineage: &ParentLineage,
    has_subtasks: bool,
) -> Result<(), ValidationErrors> {
    if parent_id == task_id {
        return Err(ValidationErrors::single(FIELD, "can't reference the task itself"));
    }
    if !lineage.exists {
        return Err(ValidationErrors::single(FIELD, "must reference an existing task"));
    }
    if lineage.ancestors.contains(&task_id) {
        return Err(ValidationErrors::single(FIELD, "would create a circular subtask chain"));
    }
    if !lineage.ancestors.is_empty() {
        return Err(ValidationErrors::single(FIELD, "can't be a subtask (subtasks can't have subtasks)"));
    }
    if has_subtasks {
        return Err(ValidationErrors::single(FIELD, "can't be set on a task that has subtasks"));
    }
    Ok(())
}

/// Walk up from `parent_id` collecting its ancestors.
///
/// Stops on a repeated id so a corrupted chain can't loop forever.
pub async fn load_lineage<R: TaskRepository + ?Sized>(repo: &R, parent_id: Uuid) -> DomainResult<ParentLineage> {
    let Some(parent) = repo.get(parent_id).await? else {
        return Ok(ParentLineage::default());
    };

    let mut ancestors = Vec::new();
    let mut seen = HashSet::from([parent_id]);
    let mut next = parent.parent_task_id;

    while let Some(id) = next {
        ancestors.push(id);
        if !seen.insert(id) {
            break;
        }
        next = match repo.get(id).await? {
            Some(task) => task.parent_task_id,
            None => None,
        };
    }

    Ok(ParentLineage { exists: true, ancestors })
}
