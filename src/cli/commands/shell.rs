//! Interactive dashboard session.
//!
//! Reads one command per line, applies it through a [`Dashboard`] and prints
//! the result. Undo history lives only as long as the session.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sqlx::SqlitePool;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::adapters::sqlite::SqliteTaskRepository;
use crate::application::{Dashboard, MoveOutcome, UndoStack};
use crate::cli::commands::{open_service, parse_rating, parse_status, RatingArg};
use crate::cli::id_resolver::resolve_task_id;
use crate::cli::output::{output, short_id, truncate, CommandOutput};
use crate::domain::models::{Config, Ratings, StatusCounts, Task, TaskStatus};

#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Override the configured undo history size
    #[arg(long)]
    pub undo_limit: Option<usize>,
}

#[derive(Parser, Debug)]
#[command(name = "taskdeck>", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Capture a task
    Add {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        title: Vec<String>,
    },
    /// Set energy, simplicity and impact (0-10 or none)
    Rate {
        id: String,
        #[arg(value_parser = parse_rating)]
        energy: RatingArg,
        #[arg(value_parser = parse_rating)]
        simplicity: RatingArg,
        #[arg(value_parser = parse_rating)]
        impact: RatingArg,
    },
    /// Move a task to another lane
    Move {
        id: String,
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    Park {
        id: String,
    },
    Complete {
        id: String,
    },
    Reopen {
        id: String,
    },
    Delete {
        id: String,
    },
    /// Add a subtask to a task
    Sub {
        parent: String,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        title: Vec<String>,
    },
    /// Tick or untick a subtask
    Toggle {
        id: String,
    },
    /// Reverse the last action
    Undo,
    /// Show all four lanes
    Board,
    /// Totals per lane
    Counts,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, serde::Serialize)]
pub struct ShellEvent {
    pub success: bool,
    pub action: &'static str,
    pub message: String,
    pub task: Option<Task>,
    pub counts: StatusCounts,
}

impl CommandOutput for ShellEvent {
    fn to_human(&self) -> String {
        let mark = if self.success { "ok" } else { "!!" };
        format!("[{mark}] {}", self.message)
    }
}

#[derive(Debug, serde::Serialize)]
pub struct BoardOutput {
    pub unrated: Vec<Task>,
    pub rated: Vec<Task>,
    pub parked: Vec<Task>,
    pub completed: Vec<Task>,
    pub counts: StatusCounts,
}

impl BoardOutput {
    fn lane(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Unrated => &self.unrated,
            TaskStatus::Rated => &self.rated,
            TaskStatus::Parked => &self.parked,
            TaskStatus::Completed => &self.completed,
        }
    }
}

impl CommandOutput for BoardOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();
        for status in TaskStatus::ALL {
            lines.push(format!("{} ({})", status.as_str().to_uppercase(), self.counts.get(status)));
            for task in self.lane(status) {
                let score = task.score.map(|s| format!("  [{s:.2}]")).unwrap_or_default();
                let focus = if task.is_focus_task { " *" } else { "" };
                lines.push(format!("  {} {}{focus}{score}", short_id(&task.id), truncate(&task.title, 50)));
            }
        }
        lines.join("\n")
    }
}

pub struct Session {
    pool: SqlitePool,
    dashboard: Dashboard<SqliteTaskRepository>,
    json_mode: bool,
}

impl Session {
    pub fn new(pool: SqlitePool, dashboard: Dashboard<SqliteTaskRepository>, json_mode: bool) -> Self {
        Self {
            pool,
            dashboard,
            json_mode,
        }
    }

    pub fn dashboard(&self) -> &Dashboard<SqliteTaskRepository> {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard<SqliteTaskRepository> {
        &mut self.dashboard
    }

    /// Process commands until `quit` or end of input.
    pub async fn run<I: AsyncBufRead + Unpin>(&mut self, input: I) -> Result<()> {
        let mut lines = input.lines();

        while let Some(line) = lines.next_line().await? {
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }

            let parsed = match ShellLine::try_parse_from(words) {
                Ok(parsed) => parsed,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            };

            match self.dispatch(parsed.command).await {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => self.emit(false, "error", format!("{err:#}"), None),
            }
        }

        Ok(())
    }

    async fn dispatch(&mut self, command: ShellCommand) -> Result<Flow> {
        match command {
            ShellCommand::Add { title } => {
                let task = self.dashboard.capture(&title.join(" ")).await?;
                self.emit(true, "add", format!("Captured {}", short_id(&task.id)), Some(task));
            }
            ShellCommand::Rate {
                id,
                energy,
                simplicity,
                impact,
            } => {
                let id = resolve_task_id(&self.pool, &id).await?;
                let ratings = Ratings {
                    energy: energy.0,
                    simplicity: simplicity.0,
                    impact: impact.0,
                };
                let task = self.dashboard.rate(id, ratings).await?;
                let message = match task.score {
                    Some(score) => format!("Rated {} ({score:.2})", task.title),
                    None => format!("Ratings saved for {}", task.title),
                };
                self.emit(true, "rate", message, Some(task));
            }
            ShellCommand::Move { id, status } => {
                let id = resolve_task_id(&self.pool, &id).await?;
                let outcome = self.dashboard.move_to(id, status).await?;
                self.report_move("move", outcome);
            }
            ShellCommand::Park { id } => {
                let id = resolve_task_id(&self.pool, &id).await?;
                let outcome = self.dashboard.park(id).await?;
                self.report_move("park", outcome);
            }
            ShellCommand::Complete { id } => {
                let id = resolve_task_id(&self.pool, &id).await?;
                let outcome = self.dashboard.complete(id).await?;
                self.report_move("complete", outcome);
            }
            ShellCommand::Reopen { id } => {
                let id = resolve_task_id(&self.pool, &id).await?;
                let outcome = self.dashboard.reopen(id).await?;
                self.report_move("reopen", outcome);
            }
            ShellCommand::Delete { id } => {
                let id = resolve_task_id(&self.pool, &id).await?;
                let deleted = self.dashboard.delete(id).await?;
                self.emit(true, "delete", format!("Deleted {}", deleted.task.title), Some(deleted.task));
            }
            ShellCommand::Sub { parent, title } => {
                let parent = resolve_task_id(&self.pool, &parent).await?;
                let task = self.dashboard.add_subtask(parent, &title.join(" ")).await?;
                self.emit(true, "sub", format!("Subtask added {}", short_id(&task.id)), Some(task));
            }
            ShellCommand::Toggle { id } => {
                let id = resolve_task_id(&self.pool, &id).await?;
                let task = self.dashboard.toggle_subtask(id).await?;
                let message = format!("{} is now {}", task.title, task.status);
                self.emit(true, "toggle", message, Some(task));
            }
            ShellCommand::Undo => match self.dashboard.undo().await? {
                Some(action) => self.emit(true, "undo", format!("Undone: {}", action.describe()), None),
                None => self.emit(false, "undo", "Nothing to undo".to_string(), None),
            },
            ShellCommand::Board => output(&self.board(), self.json_mode),
            ShellCommand::Counts => {
                let counts = self.dashboard.counts();
                let message = TaskStatus::ALL
                    .iter()
                    .map(|s| format!("{s}: {}", counts.get(*s)))
                    .collect::<Vec<_>>()
                    .join("  ");
                self.emit(true, "counts", message, None);
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn board(&self) -> BoardOutput {
        let lane = |status: TaskStatus| -> Vec<Task> {
            self.dashboard.section(status).into_iter().cloned().collect()
        };
        BoardOutput {
            unrated: lane(TaskStatus::Unrated),
            rated: lane(TaskStatus::Rated),
            parked: lane(TaskStatus::Parked),
            completed: lane(TaskStatus::Completed),
            counts: self.dashboard.counts(),
        }
    }

    fn report_move(&self, action: &'static str, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Moved(task) => {
                let message = format!("{} moved to {}", task.title, task.status);
                self.emit(true, action, message, Some(task));
            }
            MoveOutcome::Unchanged => self.emit(true, action, "Already there".to_string(), None),
            MoveOutcome::Rejected(denied) => self.emit(false, action, denied.to_string(), None),
        }
    }

    fn emit(&self, success: bool, action: &'static str, message: String, task: Option<Task>) {
        let event = ShellEvent {
            success,
            action,
            message,
            task,
            counts: self.dashboard.counts(),
        };
        output(&event, self.json_mode);
    }
}

pub async fn execute(args: ShellArgs, config: &Config, json_mode: bool) -> Result<()> {
    let (pool, service) = open_service(config).await?;
    let limit = args.undo_limit.unwrap_or(config.dashboard.undo_limit);

    let mut dashboard = Dashboard::new(service, UndoStack::new(limit));
    dashboard.refresh().await?;

    let mut session = Session::new(pool, dashboard, json_mode);
    if !json_mode {
        output(&session.board(), false);
        println!("\nType 'help' for commands, 'quit' to leave.");
    }

    session.run(BufReader::new(tokio::io::stdin())).await
}
