//! Key-value cache for fetched repository lists.
//!
//! Values are opaque strings with a per-entry TTL. Redis is used when a
//! cache host is configured; otherwise entries live in process memory.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::config::CacheConfig;

/// Errors from a cache backend.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// String cache with expiring entries.
#[async_trait]
pub trait RepoCache: Send + Sync {
    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Redis-backed cache using a multiplexed, auto-reconnecting connection.
#[derive(Clone)]
pub struct RedisRepoCache {
    conn: ConnectionManager,
}

impl RedisRepoCache {
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl RepoCache for RedisRepoCache {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let value = redis::cmd("GET")
            .arg(key)
            .query_async::<_, Option<String>>(&mut conn)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await?;
        Ok(())
    }
}

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-process cache. Expired entries are dropped lazily on read and on write.
#[derive(Default)]
pub struct MemoryRepoCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryRepoCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RepoCache for MemoryRepoCache {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(CacheEntry::is_expired) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| !entry.is_expired());
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}

/// Build the cache selected by `config`.
///
/// Falls back to [`MemoryRepoCache`] when Redis is configured but
/// unreachable at startup.
pub async fn from_config(config: &CacheConfig) -> Arc<dyn RepoCache> {
    let Some(redis_url) = config.redis_url() else {
        tracing::info!("No cache host configured, using in-memory repository cache");
        return Arc::new(MemoryRepoCache::new());
    };

    match RedisRepoCache::connect(&redis_url).await {
        Ok(cache) => {
            tracing::info!(host = ?config.host, port = config.port, "Connected to Redis cache");
            Arc::new(cache)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Redis connection failed, falling back to memory cache");
            Arc::new(MemoryRepoCache::new())
        }
    }
}
