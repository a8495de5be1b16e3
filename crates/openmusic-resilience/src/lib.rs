//! # OpenMusic Resilience
//!
//! Timeouts for persistent-store calls and retries for cache invalidation.

pub mod retry;
pub mod timeout;

pub use retry::*;
pub use timeout::*;
