//! SQLite implementation of the TaskRepository.

use async_trait::async_trait;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use super::{format_date, format_datetime, parse_datetime, parse_optional_date, parse_optional_uuid, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{StatusCounts, Task, TaskStatus};
use crate::domain::ports::{TaskFilter, TaskRepository};

#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Pool backing this repository.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: &Task) -> DomainResult<()> {
        insert_task(&self.pool, task).await?;
        Ok(())
    }

    async fn create_all(&self, tasks: &[Task]) -> DomainResult<()> {
        let mut tx = self.pool.begin().await?;
        for task in tasks {
            insert_task(&mut *tx, task).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Task::try_from).transpose()
    }

    async fn update(&self, task: &Task) -> DomainResult<()> {
        let result = sqlx::query(
            r#"UPDATE tasks SET parent_task_id = ?, position = ?, title = ?, status = ?,
               energy = ?, simplicity = ?, impact = ?, score = ?, cognitive_density = ?,
               estimated_hours = ?, notes = ?, due_date = ?, is_focus_task = ?,
               actual_energy = ?, actual_simplicity = ?, actual_impact = ?, time_spent = ?,
               updated_at = ?
               WHERE id = ?"#,
        )
        .bind(task.parent_task_id.map(|id| id.to_string()))
        .bind(task.position)
        .bind(&task.title)
        .bind(task.status.as_str())
        .bind(task.energy)
        .bind(task.simplicity)
        .bind(task.impact)
        .bind(task.score)
        .bind(task.cognitive_density)
        .bind(task.estimated_hours)
        .bind(&task.notes)
        .bind(task.due_date.map(format_date))
        .bind(task.is_focus_task)
        .bind(task.actual_energy)
        .bind(task.actual_simplicity)
        .bind(task.actual_impact)
        .bind(task.time_spent)
        .bind(format_datetime(&task.updated_at))
        .bind(task.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TaskNotFound(task.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TaskNotFound(id));
        }

        Ok(())
    }

    async fn list(&self, filter: TaskFilter) -> DomainResult<Vec<Task>> {
        let mut query = String::from("SELECT * FROM tasks WHERE 1=1");
        let mut bindings: Vec<String> = Vec::new();

        if let Some(status) = &filter.status {
            query.push_str(" AND status = ?");
            bindings.push(status.as_str().to_string());
        }
        if let Some(parent_id) = &filter.parent_id {
            query.push_str(" AND parent_task_id = ?");
            bindings.push(parent_id.to_string());
        } else if filter.main_only {
            query.push_str(" AND parent_task_id IS NULL");
        }
        if filter.focus_only {
            query.push_str(" AND is_focus_task = 1");
        }

        if filter.parent_id.is_some() {
            query.push_str(" ORDER BY position ASC, created_at ASC");
        } else if filter.status == Some(TaskStatus::Rated) {
            query.push_str(" ORDER BY score IS NULL, score DESC, created_at DESC");
        } else {
            query.push_str(" ORDER BY created_at DESC");
        }

        if let Some(limit) = filter.limit {
            query.push_str(&format!(" LIMIT {limit}"));
        }

        let mut q = sqlx::query_as::<_, TaskRow>(&query);
        for binding in &bindings {
            q = q.bind(binding);
        }

        let rows: Vec<TaskRow> = q.fetch_all(&self.pool).await?;
        rows.into_iter().map(Task::try_from).collect()
    }

    async fn get_subtasks(&self, parent_id: Uuid) -> DomainResult<Vec<Task>> {
        self.list(TaskFilter {
            parent_id: Some(parent_id),
            ..Default::default()
        })
        .await
    }

    async fn count_subtasks(&self, parent_id: Uuid) -> DomainResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE parent_task_id = ?")
            .bind(parent_id.to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    async fn max_subtask_position(&self, parent_id: Uuid) -> DomainResult<Option<i32>> {
        let (max,): (Option<i32>,) = sqlx::query_as("SELECT MAX(position) FROM tasks WHERE parent_task_id = ?")
            .bind(parent_id.to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(max)
    }

    async fn count_by_status(&self) -> DomainResult<StatusCounts> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM tasks WHERE parent_task_id IS NULL GROUP BY status")
                .fetch_all(&self.pool)
                .await?;

        let mut counts = StatusCounts::default();
        for (status_str, count) in rows {
            if let Some(status) = TaskStatus::from_str(&status_str) {
                counts.set(status, count as u64);
            }
        }
        Ok(counts)
    }
}

async fn insert_task<'e, E>(executor: E, task: &Task) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"INSERT INTO tasks (id, parent_task_id, position, title, status, energy, simplicity,
           impact, score, cognitive_density, estimated_hours, notes, due_date, is_focus_task,
           actual_energy, actual_simplicity, actual_impact, time_spent, created_at, updated_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(task.id.to_string())
    .bind(task.parent_task_id.map(|id| id.to_string()))
    .bind(task.position)
    .bind(&task.title)
    .bind(task.status.as_str())
    .bind(task.energy)
    .bind(task.simplicity)
    .bind(task.impact)
    .bind(task.score)
    .bind(task.cognitive_density)
    .bind(task.estimated_hours)
    .bind(&task.notes)
    .bind(task.due_date.map(format_date))
    .bind(task.is_focus_task)
    .bind(task.actual_energy)
    .bind(task.actual_simplicity)
    .bind(task.actual_impact)
    .bind(task.time_spent)
    .bind(format_datetime(&task.created_at))
    .bind(format_datetime(&task.updated_at))
    .execute(executor)
    .await?;

    Ok(())
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: String,
    parent_task_id: Option<String>,
    position: i32,
    title: String,
    status: String,
    energy: Option<i32>,
    simplicity: Option<i32>,
    impact: Option<i32>,
    score: Option<f64>,
    cognitive_density: i32,
    estimated_hours: f64,
    notes: Option<String>,
    due_date: Option<String>,
    is_focus_task: bool,
    actual_energy: Option<i32>,
    actual_simplicity: Option<i32>,
    actual_impact: Option<i32>,
    time_spent: Option<f64>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = DomainError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = TaskStatus::from_str(&row.status)
            .ok_or_else(|| DomainError::SerializationError(format!("Invalid status: {}", row.status)))?;

        Ok(Task {
            id: parse_uuid(&row.id)?,
            parent_task_id: parse_optional_uuid(row.parent_task_id)?,
            position: row.position,
            title: row.title,
            status,
            energy: row.energy,
            simplicity: row.simplicity,
            impact: row.impact,
            score: row.score,
            cognitive_density: row.cognitive_density,
            estimated_hours: row.estimated_hours,
            notes: row.notes,
            due_date: parse_optional_date(row.due_date)?,
            is_focus_task: row.is_focus_task,
            actual_energy: row.actual_energy,
            actual_simplicity: row.actual_simplicity,
            actual_impact: row.actual_impact,
            time_spent: row.time_spent,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}
