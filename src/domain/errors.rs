//! Domain errors for the task dashboard.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::{RatingField, TaskStatus};

/// A single failed validation rule, attached to the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Full message in the `"<Field> <message>"` form, e.g. `"Title can't be blank"`.
    pub fn full_message(&self) -> String {
        format!("{} {}", humanize(&self.field), self.message)
    }
}

/// Turn a column name into a readable label: `parent_task_id` becomes `Parent task`.
fn humanize(field: &str) -> String {
    let base = field.strip_suffix("_id").unwrap_or(field).replace('_', " ");
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Accumulated field errors from a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Messages recorded against one field.
    pub fn on(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(FieldError::full_message).collect()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}

/// Why a status change was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenialReason {
    /// Entering `rated` needs every rating; lists the ones still blank.
    MissingRatings { missing: Vec<RatingField> },
    /// A fully rated task can only fall back to `rated`, never `unrated`.
    RatingsLocked,
    /// `rated -> unrated` is never allowed.
    Forbidden,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRatings { missing } => {
                let names: Vec<&str> = missing.iter().map(|m| m.as_str()).collect();
                write!(f, "missing ratings: {}", names.join(", "))
            }
            Self::RatingsLocked => write!(f, "task is fully rated and can only return to rated"),
            Self::Forbidden => write!(f, "rated tasks cannot move back to unrated"),
        }
    }
}

/// A status change the transition table does not permit.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Cannot move task from {from} to {to}: {reason}")]
pub struct TransitionDenied {
    pub from: TaskStatus,
    pub to: TaskStatus,
    pub reason: DenialReason,
}

/// Domain-level errors that can occur in the dashboard.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),

    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    #[error(transparent)]
    TransitionDenied(#[from] TransitionDenied),

    #[error("Task {0} is not a subtask")]
    NotASubtask(Uuid),

    #[error("Please enter some text to create tasks from")]
    EmptyBrainDump,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::ValidationFailed(errors)
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
