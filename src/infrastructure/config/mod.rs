//! Configuration management
//!
//! Hierarchical configuration using figment: defaults, project YAML files,
//! then `TASKDECK_*` environment variables.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, CONFIG_DIR};
