//! Repository for the `tasks` table.

use sqlx::PgPool;
use taskhub_core::types::DbId;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, status, project_id, created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `pending`.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, title, description, status)
             VALUES ($1, $2, $3, COALESCE($4, 'pending'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tasks for a given project in creation order.
    ///
    /// Returns an empty list for a project that has no tasks or does not exist.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only fields present in `input` are applied; a
    /// present-but-null description is written as NULL.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = CASE WHEN $5 THEN $3 ELSE description END,
                status = COALESCE($4, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.clone().flatten())
            .bind(&input.status)
            .bind(input.description.is_some())
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
