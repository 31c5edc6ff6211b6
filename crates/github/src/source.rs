//! The repository-listing seam used by the enrichment flow.

use async_trait::async_trait;
use taskhub_core::github::RepoSummary;

use crate::api::{GitHubApi, GitHubApiError};

/// Something that can list a user's most recently updated repositories.
#[async_trait]
pub trait RepoSource: Send + Sync {
    async fn recent_repos(&self, username: &str) -> Result<Vec<RepoSummary>, GitHubApiError>;
}

#[async_trait]
impl RepoSource for GitHubApi {
    async fn recent_repos(&self, username: &str) -> Result<Vec<RepoSummary>, GitHubApiError> {
        let raw = self.list_recent_repos(username).await?;
        Ok(raw.into_iter().map(RepoSummary::from).collect())
    }
}
