//! Bounded history of reversible dashboard actions.

use std::collections::VecDeque;
use uuid::Uuid;

use crate::domain::models::{TaskPatch, TaskStatus};
use crate::services::DeletedTask;

/// Number of actions kept when no limit is configured
pub const DEFAULT_UNDO_LIMIT: usize = 10;

/// A user action and what is needed to reverse it.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoAction {
    TaskCreated { task_id: Uuid },
    TaskDeleted(Box<DeletedTask>),
    /// `previous` holds the prior values of exactly the edited fields
    TaskEdited { task_id: Uuid, previous: TaskPatch },
    StatusChanged { task_id: Uuid, previous: TaskStatus },
    SubtaskCreated { task_id: Uuid },
    SubtaskToggled { task_id: Uuid },
}

impl UndoAction {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TaskCreated { .. } => "task_create",
            Self::TaskDeleted(_) => "task_delete",
            Self::TaskEdited { .. } => "task_edit",
            Self::StatusChanged { .. } => "task_status_change",
            Self::SubtaskCreated { .. } => "subtask_create",
            Self::SubtaskToggled { .. } => "subtask_toggle",
        }
    }

    pub fn task_id(&self) -> Uuid {
        match self {
            Self::TaskDeleted(deleted) => deleted.task.id,
            Self::TaskCreated { task_id }
            | Self::TaskEdited { task_id, .. }
            | Self::StatusChanged { task_id, .. }
            | Self::SubtaskCreated { task_id }
            | Self::SubtaskToggled { task_id } => *task_id,
        }
    }

    /// Short human description of what undoing this does.
    pub fn describe(&self) -> String {
        match self {
            Self::TaskCreated { .. } => "removed created task".to_string(),
            Self::TaskDeleted(deleted) => format!("restored \"{}\"", deleted.task.title),
            Self::TaskEdited { .. } => "reverted edit".to_string(),
            Self::StatusChanged { previous, .. } => format!("moved back to {previous}"),
            Self::SubtaskCreated { .. } => "removed created subtask".to_string(),
            Self::SubtaskToggled { .. } => "toggled subtask back".to_string(),
        }
    }
}

/// LIFO stack that forgets its oldest entry once full.
#[derive(Debug, Clone)]
pub struct UndoStack {
    actions: VecDeque<UndoAction>,
    limit: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl UndoStack {
    /// A limit of zero is raised to one.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            actions: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn push(&mut self, action: UndoAction) {
        if self.actions.len() == self.limit {
            self.actions.pop_front();
        }
        self.actions.push_back(action);
    }

    pub fn pop(&mut self) -> Option<UndoAction> {
        self.actions.pop_back()
    }

    pub fn peek(&self) -> Option<&UndoAction> {
        self.actions.back()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(n: u128) -> UndoAction {
        UndoAction::TaskCreated {
            task_id: Uuid::from_u128(n),
        }
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = UndoStack::default();
        stack.push(created(1));
        stack.push(created(2));

        assert_eq!(stack.pop().map(|a| a.task_id()), Some(Uuid::from_u128(2)));
        assert_eq!(stack.pop().map(|a| a.task_id()), Some(Uuid::from_u128(1)));
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_oldest_evicted_past_limit() {
        let mut stack = UndoStack::default();
        for n in 0..15 {
            stack.push(created(n));
        }

        assert_eq!(stack.len(), DEFAULT_UNDO_LIMIT);
        let remaining: Vec<Uuid> = std::iter::from_fn(|| stack.pop()).map(|a| a.task_id()).collect();
        let expected: Vec<Uuid> = (5..15).rev().map(Uuid::from_u128).collect();
        assert_eq!(remaining, expected);
    }

    #[test]
    fn test_zero_limit_keeps_one() {
        let mut stack = UndoStack::new(0);
        stack.push(created(1));
        stack.push(created(2));
        assert_eq!(stack.limit(), 1);
        assert_eq!(stack.peek().map(UndoAction::task_id), Some(Uuid::from_u128(2)));
    }

    #[test]
    fn test_kinds() {
        let action = UndoAction::StatusChanged {
            task_id: Uuid::nil(),
            previous: TaskStatus::Parked,
        };
        assert_eq!(action.kind(), "task_status_change");
        assert_eq!(action.describe(), "moved back to parked");
    }
}
