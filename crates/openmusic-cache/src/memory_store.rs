//! In-process cache store.

use crate::store::{CacheResult, CacheStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// `HashMap`-backed store for local runs and tests.
///
/// Expired entries are dropped lazily on read.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a live entry exists for `key`.
    pub async fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .is_some_and(|entry| entry.is_live(now))
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Removes `key` if it is still expired under the write lock.
    ///
    /// A `set` may land between the read that saw the expired entry and this
    /// call; that fresh value is kept and returned.
    async fn evict_expired(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(Instant::now()) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                debug!("Cache entry '{}' expired", key);
                None
            }
            None => None,
        }
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => {
                    debug!("Cache hit for key '{}'", key);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => {
                    debug!("Cache miss for key '{}'", key);
                    return Ok(None);
                }
            }
        }

        Ok(self.evict_expired(key).await)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CacheResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let removed = self.entries.write().await.remove(key).is_some();
        debug!("Deleted key '{}': {}", key, removed);
        Ok(())
    }
}
