//! Executes invalidation after a committed write.

use crate::keys::CacheKey;
use crate::policy::{InvalidationPolicy, Mutation};
use crate::store::CacheStore;
use openmusic_config::CacheConfig;
use openmusic_core::{CatalogError, CatalogResult};
use openmusic_resilience::RetryPolicy;
use std::sync::Arc;
use tracing::{debug, error};

/// Counter of invalidations that left at least one key in place.
pub const INVALIDATION_FAILURE_METRIC: &str = "openmusic_cache_invalidation_failure_total";

/// Deletes every key a [`Mutation`] makes stale.
///
/// Each key is retried independently. If any key still cannot be deleted the
/// call fails with [`CatalogError::CacheInvalidation`]: the database write has
/// committed but readers may now observe the old value.
pub struct Invalidator {
    store: Arc<dyn CacheStore>,
    retry: RetryPolicy,
}

impl Invalidator {
    /// Creates an invalidator with an explicit retry policy.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// Creates an invalidator using the retry settings from `config`.
    #[must_use]
    pub fn from_config(store: Arc<dyn CacheStore>, config: &CacheConfig) -> Self {
        let retry = RetryPolicy::with_max_attempts(config.invalidation_attempts)
            .initial_delay(config.invalidation_retry_delay());
        Self::new(store, retry)
    }

    /// Invalidates the keys for `mutation`.
    pub async fn invalidate(&self, mutation: &Mutation) -> CatalogResult<()> {
        let keys = InvalidationPolicy::keys_for(mutation);
        if !self.store.is_enabled() {
            return Ok(());
        }

        let mut failed: Vec<(CacheKey, String)> = Vec::new();
        for key in keys {
            let result = self
                .retry
                .execute(|| self.store.delete(key.as_str()))
                .await;
            match result {
                Ok(()) => debug!("Invalidated '{}' after {}", key, mutation.kind()),
                Err(e) => failed.push((key, e.to_string())),
            }
        }

        if failed.is_empty() {
            return Ok(());
        }

        let keys = failed
            .iter()
            .map(|(key, _)| key.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let message = failed
            .iter()
            .map(|(_, reason)| reason.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        error!(
            mutation = mutation.kind(),
            keys = %keys,
            "Cache invalidation failed after commit: {}",
            message
        );
        metrics::counter!(INVALIDATION_FAILURE_METRIC, "mutation" => mutation.kind()).increment(1);

        Err(CatalogError::CacheInvalidation { keys, message })
    }
}
