//! Cache-aside enrichment of projects with a GitHub user's repositories.
//!
//! The project is always resolved first, so a cached list for a project
//! that no longer exists still yields 404. On a miss the list is fetched,
//! cached, and persisted onto the project; the cache write and the store
//! write are independent and not atomic.

use std::sync::Arc;
use std::time::Duration;

use sqlx::types::Json;
use taskhub_core::error::CoreError;
use taskhub_core::github::{cache_key, RepoSummary};
use taskhub_core::types::DbId;
use taskhub_db::models::project::Project;
use taskhub_db::repositories::ProjectRepo;
use taskhub_db::DbPool;
use taskhub_github::RepoSource;

use crate::cache::RepoCache;
use crate::error::{AppError, AppResult};

/// Client-facing message for any failure of the upstream call.
pub const FETCH_FAILED: &str = "Failed to fetch GitHub repositories";

pub struct GithubRepoService {
    cache: Arc<dyn RepoCache>,
    source: Arc<dyn RepoSource>,
    ttl: Duration,
}

impl GithubRepoService {
    pub fn new(cache: Arc<dyn RepoCache>, source: Arc<dyn RepoSource>, ttl: Duration) -> Self {
        Self { cache, source, ttl }
    }

    /// Name of the cache backend in use.
    pub fn cache_backend(&self) -> &'static str {
        self.cache.backend()
    }

    /// Whether the cache backend answers a ping.
    pub async fn cache_healthy(&self) -> bool {
        match self.cache.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, backend = self.cache.backend(), "Cache ping failed");
                false
            }
        }
    }

    /// Return the project with `github_repos` set to `username`'s most
    /// recently updated repositories, from cache when possible.
    pub async fn enrich(
        &self,
        pool: &DbPool,
        project_id: DbId,
        username: &str,
    ) -> AppResult<Project> {
        let mut project = ProjectRepo::find_by_id(pool, project_id)
            .await?
            .ok_or(AppError::Core(CoreError::not_found("Project")))?;

        let key = cache_key(username);
        let repos = match self.cached(&key).await {
            Some(repos) => {
                tracing::debug!(project_id, %key, count = repos.len(), "GitHub repos cache hit");
                repos
            }
            None => {
                let repos = self.source.recent_repos(username).await.map_err(|e| {
                    tracing::error!(error = %e, project_id, username, "GitHub repository fetch failed");
                    CoreError::ExternalService(FETCH_FAILED.to_string())
                })?;
                tracing::info!(project_id, %key, count = repos.len(), "Fetched GitHub repos");

                self.store(&key, &repos).await;
                if !ProjectRepo::set_github_repos(pool, project_id, &repos).await? {
                    tracing::warn!(project_id, "Project deleted before GitHub repos were saved");
                }
                repos
            }
        };

        project.github_repos = Json(repos);
        Ok(project)
    }

    /// Read and decode a cached list. Backend errors and undecodable values
    /// count as a miss.
    async fn cached(&self, key: &str) -> Option<Vec<RepoSummary>> {
        let raw = match self.cache.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, %key, "Cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(repos) => Some(repos),
            Err(e) => {
                tracing::warn!(error = %e, %key, "Discarding undecodable cache entry");
                None
            }
        }
    }

    async fn store(&self, key: &str, repos: &[RepoSummary]) {
        let value = match serde_json::to_string(repos) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, %key, "Could not serialize repos for cache");
                return;
            }
        };
        if let Err(e) = self.cache.set(key, &value, self.ttl).await {
            tracing::warn!(error = %e, %key, "Cache write failed");
        }
    }
}
