//! Handlers for the `/tasks` resource.
//!
//! Creation and listing are nested under projects:
//! `/projects/{id}/tasks`; everything else lives at `/tasks/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskhub_core::error::CoreError;
use taskhub_core::types::DbId;
use taskhub_db::models::task::{CreateTask, Task, UpdateTask};
use taskhub_db::repositories::{ProjectRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::{parse_id, ValidatedJson};
use crate::state::AppState;

const ENTITY: &str = "Task";

/// POST /api/projects/{id}/tasks
///
/// Sets `input.project_id` from the URL path after checking that the
/// project exists.
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    ValidatedJson(mut input): ValidatedJson<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let project_id = parse_id(&project_id, "Project")?;
    if !ProjectRepo::exists(&state.pool, project_id).await? {
        return Err(AppError::Core(CoreError::not_found("Project")));
    }

    input.project_id = project_id;
    let task = TaskRepo::create(&state.pool, &input).await?;
    tracing::info!(task_id = task.id, project_id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/projects/{id}/tasks
///
/// An unknown or non-numeric project id yields an empty list.
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<Vec<Task>>> {
    let Ok(project_id) = project_id.parse::<DbId>() else {
        return Ok(Json(Vec::new()));
    };
    let tasks = TaskRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    let id = parse_id(&id, ENTITY)?;
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(ENTITY)))?;
    Ok(Json(task))
}

/// PUT /api/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> AppResult<Json<Task>> {
    let id = parse_id(&id, ENTITY)?;
    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(ENTITY)))?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    let id = parse_id(&id, ENTITY)?;
    if TaskRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found(ENTITY)))
    }
}
