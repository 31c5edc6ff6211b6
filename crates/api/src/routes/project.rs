//! Route definitions for the `/projects` resource.
//!
//! Also nests the project-scoped task routes under `/projects/{id}/tasks`.
//! Every path parameter at the project position is named `id` so the
//! nested routes share one matcher segment.

use axum::routing::get;
use axum::Router;

use crate::handlers::{project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// GET    /{id}/github/{username}    -> github_repos
///
/// GET    /{id}/tasks                -> task::list_by_project
/// POST   /{id}/tasks                -> task::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/github/{username}", get(project::github_repos))
        .route(
            "/{id}/tasks",
            get(task::list_by_project).post(task::create),
        )
}
