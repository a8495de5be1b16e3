//! Provenance of a read result.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a read result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Served from the cache store.
    Cache,
    /// Freshly computed from the persistent store.
    Database,
}

impl DataSource {
    /// Header value an HTTP layer can report (`X-Data-Source: cache`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Database => "database",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A read result tagged with its [`DataSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    /// Wraps a value served from the cache.
    #[must_use]
    pub const fn cached(value: T) -> Self {
        Self {
            value,
            source: DataSource::Cache,
        }
    }

    /// Wraps a value computed from the persistent store.
    #[must_use]
    pub const fn fresh(value: T) -> Self {
        Self {
            value,
            source: DataSource::Database,
        }
    }

    /// True when the value was served from the cache.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.source == DataSource::Cache
    }

    /// Discards the provenance tag.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Transforms the value, keeping the provenance tag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            value: f(self.value),
            source: self.source,
        }
    }
}
