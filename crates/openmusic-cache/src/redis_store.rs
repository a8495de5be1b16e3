//! Redis-backed cache store.

use crate::store::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use openmusic_config::CacheConfig;
use openmusic_core::{CatalogError, CatalogResult, HealthCheck, HealthStatus};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Creates a Redis connection pool and verifies it with a `PING`.
pub async fn create_redis_pool(config: &CacheConfig) -> CatalogResult<Pool> {
    info!("Creating Redis connection pool for the cache...");

    let pool = Config::from_url(&config.url)
        .builder()
        .map_err(|e| CatalogError::Configuration(format!("Invalid Redis config: {}", e)))?
        .max_size(config.pool_size)
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| CatalogError::Configuration(format!("Failed to create pool: {}", e)))?;

    let mut conn = pool
        .get()
        .await
        .map_err(|e| CatalogError::Configuration(format!("Redis unreachable: {}", e)))?;
    deadpool_redis::redis::cmd("PING")
        .query_async::<String>(&mut *conn)
        .await
        .map_err(|e| CatalogError::Configuration(format!("Redis PING failed: {}", e)))?;

    info!("Redis connection pool created successfully");
    Ok(pool)
}

/// Redis cache store.
///
/// Every logical key is stored under `<key_prefix>:<key>`. Each call is
/// bounded by the operation timeout so a slow Redis degrades reads to the
/// database instead of stalling them.
pub struct RedisCacheStore {
    pool: Option<Arc<Pool>>,
    key_prefix: String,
    op_timeout: Duration,
}

impl RedisCacheStore {
    /// Creates a store over an existing pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>, config: &CacheConfig) -> Self {
        Self {
            pool: Some(pool),
            key_prefix: config.key_prefix.clone(),
            op_timeout: config.operation_timeout(),
        }
    }

    /// A store that caches nothing: every read misses, writes are no-ops.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            key_prefix: String::new(),
            op_timeout: Duration::ZERO,
        }
    }

    fn full_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }

    async fn get_conn(&self) -> CacheResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| CacheError::Unavailable(format!("Failed to get Redis connection: {}", e))),
            None => Err(CacheError::Unavailable("Cache is disabled".to_string())),
        }
    }

    async fn bounded<T, Fut>(&self, operation: &'static str, fut: Fut) -> CacheResult<T>
    where
        Fut: Future<Output = CacheResult<T>>,
    {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .map_err(|_| CacheError::Timeout {
                operation,
                timeout: self.op_timeout,
            })?
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let full_key = self.full_key(key);
        let value: Option<String> = self
            .bounded("get", async {
                let mut conn = self.get_conn().await?;
                conn.get(&full_key)
                    .await
                    .map_err(|e| CacheError::Backend(format!("Failed to get key '{}': {}", full_key, e)))
            })
            .await?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CacheResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let full_key = self.full_key(key);
        self.bounded("set", async {
            let mut conn = self.get_conn().await?;
            let result = match ttl {
                Some(ttl) => {
                    let ttl_secs = ttl.as_secs().max(1);
                    conn.set_ex::<_, _, ()>(&full_key, value, ttl_secs).await
                }
                None => conn.set::<_, _, ()>(&full_key, value).await,
            };
            result.map_err(|e| CacheError::Backend(format!("Failed to set key '{}': {}", full_key, e)))
        })
        .await?;

        debug!("Cached key '{}' with TTL {:?}", key, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let full_key = self.full_key(key);
        let deleted: i64 = self
            .bounded("delete", async {
                let mut conn = self.get_conn().await?;
                conn.del(&full_key).await.map_err(|e| {
                    CacheError::Backend(format!("Failed to delete key '{}': {}", full_key, e))
                })
            })
            .await?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for RedisCacheStore {
    fn name(&self) -> &str {
        "redis-cache"
    }

    async fn check(&self) -> HealthStatus {
        if !self.is_enabled() {
            return HealthStatus::Degraded("cache disabled".to_string());
        }

        let ping = self
            .bounded("ping", async {
                let mut conn = self.get_conn().await?;
                deadpool_redis::redis::cmd("PING")
                    .query_async::<String>(&mut *conn)
                    .await
                    .map_err(|e| CacheError::Backend(e.to_string()))
            })
            .await;

        match ping {
            Ok(_) => HealthStatus::Healthy,
            // reads still succeed against the database
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}
