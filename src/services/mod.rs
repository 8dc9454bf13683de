pub mod due_date;
pub mod scoring_engine;
pub mod subtask_integrity;
pub mod task_service;
pub mod transition_validator;

pub use due_date::{parse_due_date, parse_due_date_on};
pub use scoring_engine::{ScoreOutcome, ScoringEngine};
pub use subtask_integrity::{check_parent_assignment, ParentLineage};
pub use task_service::{BrainDumpFailure, BrainDumpReport, DeletedTask, TaskService, TaskUpdateOutcome};
pub use transition_validator::{can_transition, check_transition, restore_target};
