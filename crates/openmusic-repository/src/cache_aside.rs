//! Read-through cache helper shared by every repository.

use openmusic_cache::{CacheKey, CacheStore};
use openmusic_config::CacheConfig;
use openmusic_core::{CatalogResult, Sourced};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Counter of reads answered from the cache.
pub const CACHE_HIT_METRIC: &str = "openmusic_cache_hit_total";
/// Counter of reads that found no entry.
pub const CACHE_MISS_METRIC: &str = "openmusic_cache_miss_total";
/// Counter of reads that bypassed a failing cache backend.
pub const CACHE_FALLBACK_METRIC: &str = "openmusic_cache_fallback_total";

/// Cache-aside reader.
///
/// On a hit the cached value is returned tagged [`DataSource::Cache`]. On a
/// miss, an unreadable entry, or a backend failure the loader runs and its
/// result is written back. Loader errors (including `NotFound`) are returned
/// as-is and never cached.
///
/// A reader that loaded before a concurrent write committed may store its
/// result after that write's invalidation ran. The entry then stays stale
/// until the next write to the same key or until the TTL expires.
///
/// [`DataSource::Cache`]: openmusic_core::DataSource::Cache
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    ttl: Option<Duration>,
}

impl CacheAside {
    /// Creates a reader writing entries with the given expiry.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, ttl: Option<Duration>) -> Self {
        Self { store, ttl }
    }

    /// Creates a reader using the backstop TTL from `config`.
    #[must_use]
    pub fn from_config(store: Arc<dyn CacheStore>, config: &CacheConfig) -> Self {
        Self::new(store, config.ttl())
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Reads `key` from the cache, falling back to `load`.
    pub async fn read_through<T, F, Fut>(&self, key: &CacheKey, load: F) -> CatalogResult<Sourced<T>>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = CatalogResult<T>> + Send,
    {
        let namespace = key.namespace().as_str();

        match self.store.get(key.as_str()).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!("Serving '{}' from cache", key);
                    metrics::counter!(CACHE_HIT_METRIC, "namespace" => namespace).increment(1);
                    return Ok(Sourced::cached(value));
                }
                Err(e) => {
                    warn!("Discarding unreadable cache entry '{}': {}", key, e);
                    metrics::counter!(CACHE_MISS_METRIC, "namespace" => namespace).increment(1);
                }
            },
            Ok(None) => {
                metrics::counter!(CACHE_MISS_METRIC, "namespace" => namespace).increment(1);
            }
            Err(e) => {
                warn!("Cache read for '{}' failed, falling back to database: {}", key, e);
                metrics::counter!(CACHE_FALLBACK_METRIC, "namespace" => namespace).increment(1);
            }
        }

        let value = load().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                if let Err(e) = self.store.set(key.as_str(), &raw, self.ttl).await {
                    warn!("Failed to populate cache entry '{}': {}", key, e);
                }
            }
            Err(e) => warn!("Failed to serialize '{}' for caching: {}", key, e),
        }

        Ok(Sourced::fresh(value))
    }
}
