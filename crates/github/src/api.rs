//! REST API client for the GitHub repository-listing endpoint.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde::Deserialize;
use taskhub_core::github::{RepoSummary, REPO_LIMIT};

/// Connection settings for [`GitHubApi`].
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Base URL, e.g. `https://api.github.com`.
    pub api_url: String,
    /// GitHub rejects requests without a `User-Agent`.
    pub user_agent: String,
    /// Optional token; raises the anonymous rate limit when set.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            user_agent: "taskhub".to_string(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Errors from the GitHub REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum GitHubApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GitHub returned a non-2xx status code.
    #[error("GitHub API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The configured base URL cannot carry path segments.
    #[error("Invalid GitHub API URL: {0}")]
    InvalidUrl(String),

    /// The token contains characters not allowed in a header.
    #[error("Invalid GitHub token")]
    InvalidToken,
}

/// A repository object as returned by `GET /users/{username}/repos`.
///
/// Only the fields the service keeps are deserialized.
#[derive(Debug, Deserialize)]
pub struct RawRepo {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
}

impl From<RawRepo> for RepoSummary {
    fn from(raw: RawRepo) -> Self {
        Self {
            name: raw.name,
            description: raw.description,
            url: raw.html_url,
        }
    }
}

/// HTTP client for the GitHub REST API.
#[derive(Debug)]
pub struct GitHubApi {
    client: reqwest::Client,
    api_url: Url,
}

impl GitHubApi {
    /// Build a client with default headers, user agent and timeout applied.
    pub fn new(config: &GitHubConfig) -> Result<Self, GitHubApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| GitHubApiError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        let api_url = Url::parse(&config.api_url)
            .map_err(|e| GitHubApiError::InvalidUrl(format!("{}: {e}", config.api_url)))?;
        if api_url.cannot_be_a_base() {
            return Err(GitHubApiError::InvalidUrl(config.api_url.clone()));
        }

        Ok(Self { client, api_url })
    }

    /// Fetch a user's most recently updated public repositories.
    ///
    /// Sends `GET /users/{username}/repos?sort=updated&per_page=5`. The
    /// username is percent-encoded as a single path segment.
    pub async fn list_recent_repos(&self, username: &str) -> Result<Vec<RawRepo>, GitHubApiError> {
        let url = self.repos_url(username)?;
        let per_page = REPO_LIMIT.to_string();
        tracing::debug!(%url, "Fetching GitHub repositories");

        let response = self
            .client
            .get(url)
            .query(&[("sort", "updated"), ("per_page", per_page.as_str())])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    fn repos_url(&self, username: &str) -> Result<Url, GitHubApiError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitHubApiError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);
        Ok(url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GitHubApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GitHubApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GitHubApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GitHubApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
