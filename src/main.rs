//! Taskdeck CLI entry point.

use clap::Parser;

use taskdeck::cli::{commands, handle_error, Cli, Commands};
use taskdeck::infrastructure::config::ConfigLoader;
use taskdeck::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, cli.json).await,
        Commands::Task(args) => commands::task::execute(args, &config, cli.json).await,
        Commands::Subtask(args) => commands::subtask::execute(args, &config, cli.json).await,
        Commands::Shell(args) => commands::shell::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
