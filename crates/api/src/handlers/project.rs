//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskhub_core::error::CoreError;
use taskhub_db::models::project::{CreateProject, Project, UpdateProject};
use taskhub_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::{parse_id, ValidatedJson};
use crate::state::AppState;

const ENTITY: &str = "Project";

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Project>> {
    let id = parse_id(&id, ENTITY)?;
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(ENTITY)))?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    let id = parse_id(&id, ENTITY)?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(ENTITY)))?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// Tasks of the project are kept and detached.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    let id = parse_id(&id, ENTITY)?;
    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(project_id = id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found(ENTITY)))
    }
}

/// GET /api/projects/{id}/github/{username}
pub async fn github_repos(
    State(state): State<AppState>,
    Path((id, username)): Path<(String, String)>,
) -> AppResult<Json<Project>> {
    let id = parse_id(&id, ENTITY)?;
    let project = state.github.enrich(&state.pool, id, &username).await?;
    Ok(Json(project))
}
