//! Liveness endpoint, mounted at the root rather than under `/api`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// `ok` when every dependency is up and the configured cache is in use,
    /// otherwise `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DependencyStatus,
    pub cache: CacheStatus,
}

#[derive(Debug, Serialize)]
pub struct DependencyStatus {
    pub healthy: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub backend: &'static str,
    /// Backend the configuration asked for. Differs from `backend` after a
    /// startup fallback to the in-memory cache.
    pub configured: &'static str,
    pub healthy: bool,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let database = DependencyStatus {
        healthy: taskhub_db::health_check(&state.pool).await.is_ok(),
    };

    let configured = if state.config.cache.redis_url().is_some() {
        "redis"
    } else {
        "memory"
    };
    let cache = CacheStatus {
        backend: state.github.cache_backend(),
        configured,
        healthy: state.github.cache_healthy().await,
    };

    let all_up = database.healthy && cache.healthy && cache.backend == cache.configured;

    Json(HealthReport {
        status: if all_up { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
        cache,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
