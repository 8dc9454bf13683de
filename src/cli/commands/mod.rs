//! Subcommand implementations and the argument parsers they share.

pub mod init;
pub mod shell;
pub mod subtask;
pub mod task;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::adapters::sqlite::{initialize_from_config, SqliteTaskRepository};
use crate::domain::models::{Config, TaskStatus};
use crate::services::TaskService;

pub type CliTaskService = TaskService<SqliteTaskRepository>;

/// Open the configured database and build the task service over it.
pub async fn open_service(config: &Config) -> Result<(SqlitePool, Arc<CliTaskService>)> {
    let pool = initialize_from_config(&config.database)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))?;

    let repo = Arc::new(SqliteTaskRepository::new(pool.clone()));
    Ok((pool, Arc::new(TaskService::new(repo))))
}

/// A rating given on the command line; `None` clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingArg(pub Option<i32>);

/// Accepts an integer or `none`. Range checks happen in the domain so the
/// message matches every other validation error.
pub fn parse_rating(s: &str) -> Result<RatingArg, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("null") {
        return Ok(RatingArg(None));
    }
    s.parse::<i32>()
        .map(|v| RatingArg(Some(v)))
        .map_err(|_| format!("'{s}' is not a rating: use 0-10 or none"))
}

pub fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::from_str(&s.trim().to_lowercase()).ok_or_else(|| {
        format!("'{s}' is not a status: use unrated, rated, parked or completed")
    })
}
