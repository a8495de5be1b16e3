//! Shared collaborators of every repository implementation.

use crate::cache_aside::CacheAside;
use openmusic_cache::{CacheStore, Invalidator, Mutation};
use openmusic_config::{CacheConfig, DatabaseConfig};
use openmusic_core::CatalogResult;
use openmusic_resilience::with_timeout;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Cache reader, invalidator, and database call budget.
#[derive(Clone)]
pub struct RepositoryContext {
    cache: Arc<CacheAside>,
    invalidator: Arc<Invalidator>,
    db_timeout: Duration,
}

impl RepositoryContext {
    /// Creates a context from its parts.
    #[must_use]
    pub fn new(cache: Arc<CacheAside>, invalidator: Arc<Invalidator>, db_timeout: Duration) -> Self {
        Self {
            cache,
            invalidator,
            db_timeout,
        }
    }

    /// Builds the context over `store` from configuration.
    #[must_use]
    pub fn from_config(
        store: Arc<dyn CacheStore>,
        cache: &CacheConfig,
        database: &DatabaseConfig,
    ) -> Self {
        Self::new(
            Arc::new(CacheAside::from_config(Arc::clone(&store), cache)),
            Arc::new(Invalidator::from_config(store, cache)),
            database.query_timeout(),
        )
    }

    /// Cache-aside reader.
    #[must_use]
    pub fn cache(&self) -> &CacheAside {
        &self.cache
    }

    /// Runs a database call under the query timeout.
    pub async fn db<T, F, Fut>(&self, operation: &str, f: F) -> CatalogResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CatalogResult<T>>,
    {
        with_timeout(self.db_timeout, operation, f).await
    }

    /// Invalidates the keys affected by a committed `mutation`.
    pub async fn invalidate(&self, mutation: Mutation) -> CatalogResult<()> {
        self.invalidator.invalidate(&mutation).await
    }
}
