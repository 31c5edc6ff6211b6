use std::sync::Arc;

use crate::config::ServerConfig;
use crate::enrichment::GithubRepoService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: taskhub_db::DbPool,
    /// Server configuration. The health route compares the configured cache
    /// with the one actually in use.
    pub config: Arc<ServerConfig>,
    /// Cache-aside GitHub repository enrichment.
    pub github: Arc<GithubRepoService>,
}
