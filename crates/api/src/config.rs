use std::str::FromStr;
use std::time::Duration;

use taskhub_core::github::DEFAULT_CACHE_TTL_SECS;
use taskhub_github::GitHubConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Repository cache settings.
    pub cache: CacheConfig,
    /// GitHub client settings.
    pub github: GitHubConfig,
}

/// Where fetched repository lists are cached and for how long.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis host. `None` selects the in-process cache.
    pub host: Option<String>,
    pub port: u16,
    pub ttl: Duration,
}

impl CacheConfig {
    pub fn redis_url(&self) -> Option<String> {
        self.host
            .as_ref()
            .map(|host| format!("redis://{host}:{}", self.port))
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `CACHE_HOST`            | unset (in-memory cache)    |
    /// | `CACHE_PORT`            | `6379`                     |
    /// | `GITHUB_CACHE_TTL_SECS` | `600`                      |
    /// | `GITHUB_API_URL`        | `https://api.github.com`   |
    /// | `GITHUB_TOKEN`          | unset                      |
    /// | `GITHUB_USER_AGENT`     | `taskhub`                  |
    /// | `GITHUB_TIMEOUT_SECS`   | `10`                       |
    ///
    /// Panics on unparseable numeric values so misconfiguration fails fast.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = parse_env("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_env("REQUEST_TIMEOUT_SECS", 30);

        let cache = CacheConfig {
            host: non_empty_env("CACHE_HOST"),
            port: parse_env("CACHE_PORT", 6379),
            ttl: Duration::from_secs(parse_env("GITHUB_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)),
        };

        let defaults = GitHubConfig::default();
        let github = GitHubConfig {
            api_url: non_empty_env("GITHUB_API_URL").unwrap_or(defaults.api_url),
            user_agent: non_empty_env("GITHUB_USER_AGENT").unwrap_or(defaults.user_agent),
            token: non_empty_env("GITHUB_TOKEN"),
            timeout: Duration::from_secs(parse_env(
                "GITHUB_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            cache,
            github,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}
