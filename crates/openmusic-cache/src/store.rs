//! Cache store contract.

use async_trait::async_trait;
use openmusic_core::Interface;
use std::time::Duration;
use thiserror::Error;

/// Result type for cache store calls.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache backend failure.
///
/// Not part of the catalog error taxonomy: readers treat any of these as a
/// miss and go to the database.
#[derive(Debug, Error)]
pub enum CacheError {
    /// No connection could be obtained.
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete within the operation timeout.
    #[error("Cache operation '{operation}' timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    /// The backend rejected the command.
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Key/value store with optional expiry.
///
/// Keys and values are strings; callers serialize. `get` returns `Ok(None)`
/// on a miss, never an error. `delete` is idempotent.
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Reads a value. `Ok(None)` is a miss.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Writes a value, expiring after `ttl` when given.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CacheResult<()>;

    /// Removes a value. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Whether the store actually caches anything.
    fn is_enabled(&self) -> bool {
        true
    }
}
