//! Queue error types.

use openmusic_core::CatalogError;
use thiserror::Error;

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Queue-related errors.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Redis error.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Redis pool error.
    #[error("Redis pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl QueueError {
    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Redis(_) | Self::Pool(_))
    }
}

impl From<QueueError> for CatalogError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::Configuration(message) => Self::Configuration(message),
            other => Self::Queue(other.to_string()),
        }
    }
}
