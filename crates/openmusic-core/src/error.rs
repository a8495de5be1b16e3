//! Unified error types for the catalog data layer.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the catalog.
///
/// The first three variants form the domain taxonomy callers branch on
/// (404 / 400 / 403). The remaining variants are infrastructure faults.
/// Cache-backend failures are deliberately absent: the read path degrades
/// to the database instead of surfacing them.
#[derive(Error, Debug)]
pub enum CatalogError {
    // ============ Domain Errors ============
    /// Referenced entity does not exist. Never cached, never retried.
    #[error("{resource} not found: {id}")]
    NotFound {
        resource: &'static str,
        id: String,
    },

    /// Business rule violation (duplicate like, zero-row insert, ...).
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Caller holds neither the owner nor the collaborator relation.
    #[error("Not authorized: {0}")]
    Authorization(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// A committed write could not clear every derived cache key.
    #[error("Cache invalidation failed for [{keys}]: {message}")]
    CacheInvalidation { keys: String, message: String },

    /// Message queue error
    #[error("Queue error: {0}")]
    Queue(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CatalogError {
    /// Message used for every owner/collaborator denial so callers see a
    /// single error identity regardless of which check failed.
    pub const ACCESS_DENIED: &'static str = "You are not entitled to access this resource";

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Invariant(_) => 400,
            Self::Authorization(_) => 403,
            Self::Timeout(_) => 503,
            Self::Database(_)
            | Self::CacheInvalidation { .. }
            | Self::Queue(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Invariant(_) => "INVARIANT_ERROR",
            Self::Authorization(_) => "AUTHORIZATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::CacheInvalidation { .. } => "CACHE_INVALIDATION_ERROR",
            Self::Queue(_) => "QUEUE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource: &'static str, id: T) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Creates an invariant error.
    #[must_use]
    pub fn invariant<T: Into<String>>(message: T) -> Self {
        Self::Invariant(message.into())
    }

    /// Creates the canonical access-denied error.
    #[must_use]
    pub fn access_denied() -> Self {
        Self::Authorization(Self::ACCESS_DENIED.to_string())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// True for the domain taxonomy (NotFound, Invariant, Authorization).
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Invariant(_) | Self::Authorization(_)
        )
    }

    /// Checks if this error is retriable.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Timeout(_) | Self::Queue(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                // PostgreSQL unique violation
                Some("23505") => Self::Invariant(db_err.message().to_string()),
                // PostgreSQL foreign key violation
                Some("23503") => Self::Invariant(format!(
                    "referenced entity does not exist: {}",
                    db_err.message()
                )),
                _ => Self::Database(err.to_string()),
            },
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error body for the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `"fail"` for 4xx and `"error"` for 5xx.
    pub status: String,
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `CatalogError`.
    #[must_use]
    pub fn from_error(error: &CatalogError) -> Self {
        let status = if error.status_code() < 500 { "fail" } else { "error" };
        Self {
            status: status.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<&CatalogError> for ErrorResponse {
    fn from(error: &CatalogError) -> Self {
        Self::from_error(error)
    }
}
