//! Repository summaries attached to projects.

use serde::{Deserialize, Serialize};

/// Number of most recently updated repositories requested per user.
pub const REPO_LIMIT: u8 = 5;

/// Default lifetime of a cached repository list, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

/// Minimal projection of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
}

/// Cache key under which a user's repository list is stored.
///
/// ```
/// use taskhub_core::github::cache_key;
///
/// assert_eq!(cache_key("octocat"), "github:octocat");
/// ```
pub fn cache_key(username: &str) -> String {
    format!("github:{username}")
}
