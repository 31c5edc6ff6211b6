//! Repository for the `projects` table.

use sqlx::types::Json;
use sqlx::PgPool;
use taskhub_core::github::RepoSummary;
use taskhub_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, github_repos, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY id ASC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Update a project. Only fields present in `input` are applied; a
    /// present-but-null description is written as NULL.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = CASE WHEN $4 THEN $3 ELSE description END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.clone().flatten())
            .bind(input.description.is_some())
            .fetch_optional(pool)
            .await
    }

    /// Replace the stored repository list. Returns `true` if the row exists.
    pub async fn set_github_repos(
        pool: &PgPool,
        id: DbId,
        repos: &[RepoSummary],
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET github_repos = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(Json(repos))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a project by ID. Returns `true` if a row was removed.
    ///
    /// Tasks referencing the project are kept with `project_id` set to NULL
    /// by the foreign key's `ON DELETE SET NULL`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
