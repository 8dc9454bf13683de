//! Subtask CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::commands::task::TaskOutcomeOutput;
use crate::cli::commands::{open_service, parse_status};
use crate::cli::id_resolver::resolve_task_id;
use crate::cli::output::{output, short_id, CommandOutput, TableFormatter};
use crate::domain::models::{Config, Task, TaskStatus};

#[derive(Args, Debug)]
pub struct SubtaskArgs {
    #[command(subcommand)]
    pub command: SubtaskCommands,
}

#[derive(Subcommand, Debug)]
pub enum SubtaskCommands {
    /// Add a checklist item to a task
    Add {
        /// Parent task ID or unique prefix
        parent: String,
        /// Subtask title
        title: String,
    },
    /// List a task's subtasks in order
    List {
        /// Parent task ID or unique prefix
        parent: String,
    },
    /// Tick or untick a subtask
    Toggle {
        /// Subtask ID or unique prefix
        id: String,
    },
    /// Turn a subtask into a main task
    Promote {
        /// Subtask ID or unique prefix
        id: String,
        /// Lane for the promoted task
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
    },
}

#[derive(Debug, serde::Serialize)]
pub struct SubtaskListOutput {
    pub parent: Task,
    pub subtasks: Vec<Task>,
}

impl CommandOutput for SubtaskListOutput {
    fn to_human(&self) -> String {
        if self.subtasks.is_empty() {
            return format!("No subtasks for {}.", self.parent.title);
        }
        let done = self
            .subtasks
            .iter()
            .filter(|s| s.status == TaskStatus::Completed)
            .count();
        format!(
            "{} ({done}/{} done)\n{}",
            self.parent.title,
            self.subtasks.len(),
            TableFormatter::new().format_subtasks(&self.subtasks)
        )
    }
}

pub async fn execute(args: SubtaskArgs, config: &Config, json_mode: bool) -> Result<()> {
    let (pool, service) = open_service(config).await?;

    match args.command {
        SubtaskCommands::Add { parent, title } => {
            let parent_id = resolve_task_id(&pool, &parent).await?;
            let outcome = service.create_subtask(parent_id, &title).await?;
            let message = format!("Subtask added: {}", short_id(&outcome.task.id));
            output(&TaskOutcomeOutput::new(message, outcome), json_mode);
        }

        SubtaskCommands::List { parent } => {
            let parent_id = resolve_task_id(&pool, &parent).await?;
            let parent = service
                .get_task(parent_id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Task {parent} not found"))?;
            let subtasks = service.list_subtasks(parent_id).await?;
            output(&SubtaskListOutput { parent, subtasks }, json_mode);
        }

        SubtaskCommands::Toggle { id } => {
            let uuid = resolve_task_id(&pool, &id).await?;
            let outcome = service.toggle_subtask(uuid).await?;
            let message = if outcome.task.status == TaskStatus::Completed {
                "Subtask done"
            } else {
                "Subtask reopened"
            };
            output(&TaskOutcomeOutput::new(message, outcome), json_mode);
        }

        SubtaskCommands::Promote { id, status } => {
            let uuid = resolve_task_id(&pool, &id).await?;
            let outcome = service.convert_to_main_task(uuid, status).await?;
            let message = format!("Subtask promoted to a {} task", outcome.task.status);
            output(&TaskOutcomeOutput::new(message, outcome), json_mode);
        }
    }

    Ok(())
}
