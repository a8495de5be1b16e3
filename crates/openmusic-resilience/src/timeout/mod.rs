//! Timeout wrapper for async operations.

use openmusic_core::CatalogError;
use std::time::Duration;

/// Wraps an async operation with a timeout.
///
/// `operation` names the call in the resulting [`CatalogError::Timeout`].
/// The wrapped future is dropped on expiry, so nothing after it runs.
pub async fn with_timeout<F, Fut, T>(duration: Duration, operation: &str, f: F) -> Result<T, CatalogError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, CatalogError>>,
{
    tokio::time::timeout(duration, f())
        .await
        .map_err(|_| CatalogError::Timeout(format!("{} timed out after {:?}", operation, duration)))?
}
