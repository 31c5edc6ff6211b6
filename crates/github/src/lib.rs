//! GitHub REST client used to enrich projects with repository listings.
//!
//! [`api::GitHubApi`] talks to the real API with [`reqwest`];
//! [`source::RepoSource`] is the seam the enrichment flow depends on so
//! that tests can substitute a fake.

pub mod api;
pub mod source;

pub use api::{GitHubApi, GitHubApiError, GitHubConfig};
pub use source::RepoSource;
