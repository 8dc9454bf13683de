//! Task CLI commands.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use std::io::Read;

use crate::cli::commands::{open_service, parse_rating, parse_status, RatingArg};
use crate::cli::id_resolver::resolve_task_id;
use crate::cli::output::{output, short_id, CommandOutput, TableFormatter};
use crate::domain::models::{Config, StatusCounts, Task, TaskPatch, TaskStatus};
use crate::domain::ports::TaskFilter;
use crate::services::{parse_due_date, BrainDumpReport, DeletedTask, TaskUpdateOutcome};

#[derive(Args, Debug)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    Add {
        /// Task title
        title: String,
        #[command(flatten)]
        fields: TaskFieldArgs,
    },
    /// Show a task and its subtasks
    Show {
        /// Task ID or unique prefix
        id: String,
    },
    /// List tasks
    List {
        /// Only tasks in this lane
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
        /// Only focus tasks
        #[arg(long)]
        focus: bool,
        /// Include subtasks
        #[arg(long)]
        all: bool,
        /// Maximum number of tasks
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Change task fields; `none` clears a rating
    Update {
        /// Task ID or unique prefix
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFieldArgs,
        /// Energy actually spent
        #[arg(long, value_parser = parse_rating)]
        actual_energy: Option<RatingArg>,
        /// Simplicity as it turned out
        #[arg(long, value_parser = parse_rating)]
        actual_simplicity: Option<RatingArg>,
        /// Impact as it turned out
        #[arg(long, value_parser = parse_rating)]
        actual_impact: Option<RatingArg>,
        /// Hours spent, or `none`
        #[arg(long)]
        time_spent: Option<String>,
        /// Parent task ID to make this a subtask, or `none`
        #[arg(long)]
        parent: Option<String>,
        /// Partial attributes as JSON; flags given alongside take precedence
        #[arg(long)]
        patch_json: Option<String>,
    },
    /// Move a task to another lane
    Move {
        /// Task ID or unique prefix
        id: String,
        /// Target lane
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    /// Park a task
    Park {
        /// Task ID or unique prefix
        id: String,
    },
    /// Complete a task
    Complete {
        /// Task ID or unique prefix
        id: String,
    },
    /// Send a parked or completed task back to the active lanes
    Reopen {
        /// Task ID or unique prefix
        id: String,
    },
    /// Delete a task and its subtasks
    Delete {
        /// Task ID or unique prefix
        id: String,
    },
    /// Copy a task (subtasks are not copied)
    Duplicate {
        /// Task ID or unique prefix
        id: String,
    },
    /// Create one unrated task per line; reads stdin when no text is given
    BrainDump {
        text: Option<String>,
    },
    /// Totals per lane
    Counts,
}

/// Fields shared by `add` and `update`.
#[derive(Args, Debug, Default)]
pub struct TaskFieldArgs {
    /// Energy rating 0-10
    #[arg(short, long, value_parser = parse_rating)]
    pub energy: Option<RatingArg>,
    /// Simplicity rating 0-10
    #[arg(short, long, value_parser = parse_rating)]
    pub simplicity: Option<RatingArg>,
    /// Impact rating 0-10
    #[arg(short, long, value_parser = parse_rating)]
    pub impact: Option<RatingArg>,
    /// Cognitive density 0-3
    #[arg(long)]
    pub density: Option<i32>,
    /// Estimated hours 0-8
    #[arg(long)]
    pub hours: Option<f64>,
    /// Free-form notes; empty clears
    #[arg(long)]
    pub notes: Option<String>,
    /// Due date: MM/DD, MM/DD/YY, MM/DD/YYYY or YYYY-MM-DD
    #[arg(long)]
    pub due: Option<String>,
    /// Mark or unmark as a focus task
    #[arg(long)]
    pub focus: Option<bool>,
    /// Explicit lane
    #[arg(long)]
    pub status: Option<String>,
}

impl TaskFieldArgs {
    /// Overlay these fields on `patch`.
    pub fn apply_to(self, patch: &mut TaskPatch) {
        if let Some(RatingArg(v)) = self.energy {
            patch.energy = Some(v);
        }
        if let Some(RatingArg(v)) = self.simplicity {
            patch.simplicity = Some(v);
        }
        if let Some(RatingArg(v)) = self.impact {
            patch.impact = Some(v);
        }
        if let Some(v) = self.density {
            patch.cognitive_density = Some(v);
        }
        if let Some(v) = self.hours {
            patch.estimated_hours = Some(v);
        }
        if let Some(notes) = self.notes {
            patch.notes = Some((!notes.trim().is_empty()).then_some(notes));
        }
        if let Some(due) = self.due {
            patch.due_date = Some(if due.trim().eq_ignore_ascii_case("none") {
                None
            } else {
                parse_due_date(&due)
            });
        }
        if let Some(v) = self.focus {
            patch.is_focus_task = Some(v);
        }
        if let Some(status) = self.status {
            patch.status = Some(status);
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct TaskOutcomeOutput {
    pub success: bool,
    pub message: String,
    pub task: Task,
    pub counts: StatusCounts,
}

impl TaskOutcomeOutput {
    pub fn new(message: impl Into<String>, outcome: TaskUpdateOutcome) -> Self {
        Self {
            success: true,
            message: message.into(),
            task: outcome.task,
            counts: outcome.counts,
        }
    }
}

impl CommandOutput for TaskOutcomeOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        lines.extend(task_lines(&self.task).into_iter().map(|l| format!("  {l}")));
        lines.join("\n")
    }
}

#[derive(Debug, serde::Serialize)]
pub struct TaskListOutput {
    pub tasks: Vec<Task>,
    pub total: usize,
}

impl CommandOutput for TaskListOutput {
    fn to_human(&self) -> String {
        if self.tasks.is_empty() {
            return "No tasks found.".to_string();
        }
        format!(
            "{}\n\nShowing {} task(s)",
            TableFormatter::new().format_tasks(&self.tasks),
            self.total
        )
    }
}

#[derive(Debug, serde::Serialize)]
pub struct TaskDetailOutput {
    pub task: Task,
    pub subtasks: Vec<Task>,
}

impl CommandOutput for TaskDetailOutput {
    fn to_human(&self) -> String {
        let mut lines = task_lines(&self.task);
        if !self.subtasks.is_empty() {
            lines.push(String::new());
            lines.push(TableFormatter::new().format_subtasks(&self.subtasks));
        }
        lines.join("\n")
    }
}

#[derive(Debug, serde::Serialize)]
pub struct DeleteOutput {
    pub success: bool,
    pub message: String,
    pub deleted: DeletedTask,
}

impl CommandOutput for DeleteOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
pub struct CountsOutput(pub StatusCounts);

impl CommandOutput for CountsOutput {
    fn to_human(&self) -> String {
        TableFormatter::new().format_counts(&self.0)
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
pub struct BrainDumpOutput(pub BrainDumpReport);

impl CommandOutput for BrainDumpOutput {
    fn to_human(&self) -> String {
        let report = &self.0;
        let mut lines = vec![format!("Created {} task(s)", report.created.len())];
        for task in &report.created {
            lines.push(format!("  + {} {}", short_id(&task.id), task.title));
        }
        if !report.failed.is_empty() {
            lines.push(format!("Failed {} line(s):", report.failed.len()));
            for failure in &report.failed {
                lines.push(format!("  - {:?}: {}", failure.title, failure.errors.join(", ")));
            }
        }
        lines.join("\n")
    }
}

/// Key/value lines describing one task.
pub fn task_lines(task: &Task) -> Vec<String> {
    let rating = |r: Option<i32>| r.map_or_else(|| "-".to_string(), |v| v.to_string());
    let mut lines = vec![
        format!("Task: {}", task.title),
        format!("ID: {}", task.id),
        format!("Status: {}", task.status),
    ];

    if let Some(parent) = task.parent_task_id {
        lines.push(format!("Parent: {parent} (position {})", task.position));
    } else {
        lines.push(format!(
            "Ratings: energy {} / simplicity {} / impact {}",
            rating(task.energy),
            rating(task.simplicity),
            rating(task.impact)
        ));
        if let Some(score) = task.score {
            lines.push(format!("Score: {score:.2}"));
        }
    }
    if task.is_focus_task {
        lines.push("Focus: yes".to_string());
    }
    if task.cognitive_density > 0 || task.estimated_hours > 0.0 {
        lines.push(format!(
            "Effort: density {} / {:.1}h estimated",
            task.cognitive_density, task.estimated_hours
        ));
    }
    if let Some(due) = task.due_date {
        lines.push(format!("Due: {due}"));
    }
    if let Some(spent) = task.time_spent {
        lines.push(format!("Time spent: {spent:.1}h"));
    }
    if let Some(notes) = &task.notes {
        lines.push(format!("Notes: {notes}"));
    }
    lines.push(format!("Updated: {}", task.updated_at.format("%Y-%m-%d %H:%M UTC")));
    lines
}

pub async fn execute(args: TaskArgs, config: &Config, json_mode: bool) -> Result<()> {
    let (pool, service) = open_service(config).await?;

    match args.command {
        TaskCommands::Add { title, fields } => {
            let mut patch = TaskPatch::titled(title);
            fields.apply_to(&mut patch);

            let outcome = service.create_task(patch).await?;
            let message = format!("Task created: {}", short_id(&outcome.task.id));
            output(&TaskOutcomeOutput::new(message, outcome), json_mode);
        }

        TaskCommands::Show { id } => {
            let uuid = resolve_task_id(&pool, &id).await?;
            let task = service
                .get_task(uuid)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Task {id} not found. Use 'taskdeck task list' to see tasks."))?;
            let subtasks = if task.is_subtask() {
                Vec::new()
            } else {
                service.list_subtasks(uuid).await?
            };
            output(&TaskDetailOutput { task, subtasks }, json_mode);
        }

        TaskCommands::List { status, focus, all, limit } => {
            let filter = TaskFilter {
                status,
                main_only: !all,
                focus_only: focus,
                limit,
                ..Default::default()
            };
            let tasks = service.list_tasks(filter).await?;
            let out = TaskListOutput {
                total: tasks.len(),
                tasks,
            };
            output(&out, json_mode);
        }

        TaskCommands::Update {
            id,
            title,
            fields,
            actual_energy,
            actual_simplicity,
            actual_impact,
            time_spent,
            parent,
            patch_json,
        } => {
            let uuid = resolve_task_id(&pool, &id).await?;

            let mut patch = match patch_json {
                Some(raw) => serde_json::from_str::<TaskPatch>(&raw).context("Invalid --patch-json")?,
                None => TaskPatch::default(),
            };
            if let Some(title) = title {
                patch.title = Some(title);
            }
            fields.apply_to(&mut patch);
            if let Some(RatingArg(v)) = actual_energy {
                patch.actual_energy = Some(v);
            }
            if let Some(RatingArg(v)) = actual_simplicity {
                patch.actual_simplicity = Some(v);
            }
            if let Some(RatingArg(v)) = actual_impact {
                patch.actual_impact = Some(v);
            }
            if let Some(raw) = time_spent {
                patch.time_spent = Some(parse_optional_hours(&raw)?);
            }
            if let Some(raw) = parent {
                patch.parent_task_id = Some(if raw.trim().eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(resolve_task_id(&pool, &raw).await?)
                });
            }
            if patch.is_empty() {
                bail!("Nothing to update. Pass at least one field, e.g. --title or --energy");
            }

            let outcome = service.update_task(uuid, patch).await?;
            output(&TaskOutcomeOutput::new("Task updated", outcome), json_mode);
        }

        TaskCommands::Move { id, status } => {
            let uuid = resolve_task_id(&pool, &id).await?;
            let outcome = service.move_task(uuid, status).await?;
            output(&TaskOutcomeOutput::new(format!("Task moved to {status}"), outcome), json_mode);
        }

        TaskCommands::Park { id } => {
            let uuid = resolve_task_id(&pool, &id).await?;
            let outcome = service.move_task(uuid, TaskStatus::Parked).await?;
            output(&TaskOutcomeOutput::new("Task parked", outcome), json_mode);
        }

        TaskCommands::Complete { id } => {
            let uuid = resolve_task_id(&pool, &id).await?;
            let outcome = service.move_task(uuid, TaskStatus::Completed).await?;
            output(&TaskOutcomeOutput::new("Task completed", outcome), json_mode);
        }

        TaskCommands::Reopen { id } => {
            let uuid = resolve_task_id(&pool, &id).await?;
            let outcome = service.reopen_task(uuid).await?;
            let message = format!("Task reopened as {}", outcome.task.status);
            output(&TaskOutcomeOutput::new(message, outcome), json_mode);
        }

        TaskCommands::Delete { id } => {
            let uuid = resolve_task_id(&pool, &id).await?;
            let deleted = service.delete_task(uuid).await?;
            let message = match deleted.subtasks.len() {
                0 => format!("Task deleted: {}", deleted.task.title),
                n => format!("Task deleted: {} (with {n} subtask(s))", deleted.task.title),
            };
            output(
                &DeleteOutput {
                    success: true,
                    message,
                    deleted,
                },
                json_mode,
            );
        }

        TaskCommands::Duplicate { id } => {
            let uuid = resolve_task_id(&pool, &id).await?;
            let outcome = service.duplicate_task(uuid).await?;
            let message = format!("Task duplicated: {}", short_id(&outcome.task.id));
            output(&TaskOutcomeOutput::new(message, outcome), json_mode);
        }

        TaskCommands::BrainDump { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read brain dump from stdin")?;
                    buf
                }
            };
            let report = service.brain_dump(&text).await?;
            output(&BrainDumpOutput(report), json_mode);
        }

        TaskCommands::Counts => {
            let counts = service.status_counts().await?;
            output(&CountsOutput(counts), json_mode);
        }
    }

    Ok(())
}

fn parse_optional_hours(raw: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") || raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .with_context(|| format!("'{raw}' is not a number of hours"))
}
