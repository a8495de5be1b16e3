//! Catalog domain entities.
//!
//! These are the shapes the repositories return and the cache stores. Field
//! names serialize in camelCase so a cached entry is byte-compatible with the
//! HTTP response body it backs.

pub mod album;
pub mod playlist;
pub mod song;

pub use album::*;
pub use playlist::*;
pub use song::*;
