//! Shared fixtures for integration tests.

use std::sync::Arc;

use taskdeck::adapters::sqlite::{create_migrated_test_pool, SqliteTaskRepository};
use taskdeck::application::{Dashboard, UndoStack};
use taskdeck::services::TaskService;

pub type TestService = TaskService<SqliteTaskRepository>;

/// Task service over a fresh in-memory database.
pub async fn setup_service() -> Arc<TestService> {
    let pool = create_migrated_test_pool()
        .await
        .expect("Failed to create test database");
    Arc::new(TaskService::new(Arc::new(SqliteTaskRepository::new(pool))))
}

/// Dashboard with an empty view over a fresh in-memory database.
#[allow(dead_code)]
pub async fn setup_dashboard(undo_limit: usize) -> Dashboard<SqliteTaskRepository> {
    Dashboard::new(setup_service().await, UndoStack::new(undo_limit))
}

/// Initialize tracing for tests that want log output.
#[allow(dead_code)]
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
