use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for taskdeck
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Interactive dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Connection URL understood by sqlx.
    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}

fn default_database_path() -> String {
    ".taskdeck/taskdeck.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files (console only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,

    /// Write logs to stderr
    #[serde(default = "default_true")]
    pub enable_console: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: RotationPolicy::default(),
            enable_console: default_true(),
        }
    }
}

/// Dashboard session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardConfig {
    /// How many actions the undo stack keeps
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,
}

const fn default_undo_limit() -> usize {
    10
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            undo_limit: default_undo_limit(),
        }
    }
}
