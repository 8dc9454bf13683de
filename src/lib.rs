//! Taskdeck - personal task dashboard
//!
//! Tasks are rated on energy, simplicity and impact; a weighted score orders
//! the `rated` lane. Tasks move between four lanes (`unrated`, `rated`,
//! `parked`, `completed`) under a fixed transition table, and may carry one
//! level of subtasks.
//!
//! # Architecture
//!
//! - **Domain** (`domain`): models, errors and the repository port
//! - **Services** (`services`): scoring, transition rules, subtask integrity,
//!   and the task service that ties them to persistence
//! - **Application** (`application`): the dashboard view model and undo stack
//! - **Adapters** (`adapters`): SQLite persistence
//! - **Infrastructure** (`infrastructure`): configuration and logging
//! - **CLI** (`cli`): the `taskdeck` command line

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use application::{Dashboard, MoveOutcome, UndoAction, UndoStack};
pub use domain::errors::{DomainError, DomainResult, TransitionDenied, ValidationErrors};
pub use domain::models::{Config, Ratings, StatusCounts, Task, TaskPatch, TaskStatus};
pub use domain::ports::{TaskFilter, TaskRepository};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ScoringEngine, TaskService};
