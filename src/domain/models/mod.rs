//! Domain models.

pub mod config;
pub mod task;

pub use config::{Config, DashboardConfig, DatabaseConfig, LoggingConfig, RotationPolicy};
pub use task::{RatingField, Ratings, StatusCounts, Task, TaskPatch, TaskStatus};
