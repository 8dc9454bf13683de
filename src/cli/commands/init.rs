//! Implementation of the `taskdeck init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::fs;

use crate::adapters::sqlite::initialize_database;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::CONFIG_DIR;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Recreate config and database even if already initialized
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub initialized_path: PathBuf,
    pub config_written: bool,
    pub database_path: Option<PathBuf>,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.config_written {
            lines.push(format!("  Config: {}/config.yaml", CONFIG_DIR));
        }
        if let Some(db) = &self.database_path {
            lines.push(format!("  Database: {}", db.display()));
        }
        lines.join("\n")
    }
}

pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };
    let deck_dir = target_path.join(CONFIG_DIR);

    if deck_dir.exists() && !args.force {
        let out = InitOutput {
            success: false,
            message: "Project already initialized. Use --force to reinitialize.".to_string(),
            initialized_path: target_path,
            config_written: false,
            database_path: None,
        };
        output(&out, json_mode);
        return Ok(());
    }

    if args.force && deck_dir.exists() {
        fs::remove_dir_all(&deck_dir)
            .await
            .with_context(|| format!("Failed to remove existing {}", deck_dir.display()))?;
    }

    fs::create_dir_all(&deck_dir)
        .await
        .with_context(|| format!("Failed to create {}", deck_dir.display()))?;

    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).context("Failed to serialize default config")?;
    fs::write(deck_dir.join("config.yaml"), yaml)
        .await
        .context("Failed to write config.yaml")?;

    let db_path = deck_dir.join("taskdeck.db");
    let db_url = format!("sqlite:{}", db_path.display());
    let pool = initialize_database(&db_url, None)
        .await
        .context("Failed to initialize database")?;
    pool.close().await;

    let out = InitOutput {
        success: true,
        message: if args.force {
            "Project reinitialized.".to_string()
        } else {
            "Project initialized.".to_string()
        },
        initialized_path: target_path,
        config_written: true,
        database_path: Some(db_path),
    };
    output(&out, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ConfigLoader;

    #[tokio::test]
    async fn test_init_creates_config_and_database() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            force: false,
            path: dir.path().to_path_buf(),
        };
        execute(args, true).await.unwrap();

        let deck = dir.path().join(CONFIG_DIR);
        assert!(deck.join("taskdeck.db").exists());

        let config = ConfigLoader::load_from_file(deck.join("config.yaml")).unwrap();
        assert_eq!(config.database.path, ".taskdeck/taskdeck.db");
    }

    #[tokio::test]
    async fn test_second_init_without_force_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_path_buf();
        execute(InitArgs { force: false, path: path.clone() }, true).await.unwrap();

        let marker = path.join(CONFIG_DIR).join("local.yaml");
        std::fs::write(&marker, "logging:\n  level: debug\n").unwrap();

        execute(InitArgs { force: false, path: path.clone() }, true).await.unwrap();
        assert!(marker.exists());

        execute(InitArgs { force: true, path }, true).await.unwrap();
        assert!(!marker.exists());
    }
}
