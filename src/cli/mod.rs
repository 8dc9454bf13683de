//! Command-line interface.

pub mod commands;
pub mod id_resolver;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{init::InitArgs, shell::ShellArgs, subtask::SubtaskArgs, task::TaskArgs};

/// Personal task dashboard: rate tasks, let the score order them.
#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Config file to use instead of .taskdeck/config.yaml
    #[arg(long, global = true, env = "TASKDECK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the .taskdeck directory, config and database
    Init(InitArgs),
    /// Create, rate, move and inspect tasks
    Task(TaskArgs),
    /// Manage a task's checklist
    Subtask(SubtaskArgs),
    /// Interactive dashboard session with undo
    Shell(ShellArgs),
}

/// Print a command failure and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
