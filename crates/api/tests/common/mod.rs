#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taskhub_api::cache::{CacheError, MemoryRepoCache, RepoCache};
use taskhub_api::config::{CacheConfig, ServerConfig};
use taskhub_api::enrichment::GithubRepoService;
use taskhub_api::router::build_app_router;
use taskhub_api::state::AppState;
use taskhub_core::github::RepoSummary;
use taskhub_github::{GitHubApiError, GitHubConfig, RepoSource};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cache: CacheConfig {
            host: None,
            port: 6379,
            ttl: Duration::from_secs(600),
        },
        github: GitHubConfig::default(),
    }
}

/// Build the full application router with a fake GitHub source that returns
/// no repositories.
pub fn build_test_app(pool: PgPool) -> Router {
    let service = GithubRepoService::new(
        Arc::new(MemoryRepoCache::new()),
        Arc::new(FakeSource::returning(Vec::new())),
        Duration::from_secs(600),
    );
    build_test_app_with(pool, Arc::new(service))
}

/// Build the full application router around a prepared enrichment service.
pub fn build_test_app_with(pool: PgPool, github: Arc<GithubRepoService>) -> Router {
    build_test_app_with_config(pool, github, test_config())
}

pub fn build_test_app_with_config(
    pool: PgPool,
    github: Arc<GithubRepoService>,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        github,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Enrichment doubles
// ---------------------------------------------------------------------------

/// A `RepoSource` that counts its calls and either returns a fixed list or
/// fails with an upstream error.
pub struct FakeSource {
    repos: Vec<RepoSummary>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn returning(repos: Vec<RepoSummary>) -> Self {
        Self {
            repos,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            repos: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepoSource for FakeSource {
    async fn recent_repos(&self, _username: &str) -> Result<Vec<RepoSummary>, GitHubApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GitHubApiError::ApiError {
                status: 503,
                body: "upstream unavailable".into(),
            });
        }
        Ok(self.repos.clone())
    }
}

/// An in-memory cache that counts writes.
#[derive(Default)]
pub struct CountingCache {
    inner: MemoryRepoCache,
    writes: AtomicUsize,
}

impl CountingCache {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepoCache for CountingCache {
    fn backend(&self) -> &'static str {
        self.inner.backend()
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, ttl).await
    }
}

pub fn repo(name: &str, description: Option<&str>, url: &str) -> RepoSummary {
    RepoSummary {
        name: name.to_string(),
        description: description.map(str::to_string),
        url: url.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, &body.to_string()).await
}

/// POST an arbitrary (possibly malformed) JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::put(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::delete(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Create a project through the API and return its id.
pub async fn create_project(pool: &PgPool, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/projects", serde_json::json!({ "name": name })).await;
    body_json(response).await["id"].as_i64().unwrap()
}
