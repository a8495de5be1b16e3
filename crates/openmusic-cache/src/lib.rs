//! # OpenMusic Cache
//!
//! The cache side of the cache-aside pattern:
//!
//! - [`CacheStore`]: `get` / `set` / `delete` over string keys and values,
//!   with an explicit miss and a distinguishable backend failure.
//! - [`CacheKey`]: the logical key namespace (`song:<id>`, `songs:all`, ...).
//! - [`InvalidationPolicy`]: which keys each [`Mutation`] makes stale.
//! - [`Invalidator`]: deletes those keys after a committed write and
//!   escalates when it cannot.

pub mod invalidator;
pub mod keys;
pub mod memory_store;
pub mod policy;
pub mod redis_store;
pub mod store;

pub use invalidator::Invalidator;
pub use keys::{CacheKey, Namespace};
pub use memory_store::MemoryCacheStore;
pub use policy::{InvalidationPolicy, Mutation};
pub use redis_store::{create_redis_pool, RedisCacheStore};
pub use store::{CacheError, CacheResult, CacheStore};
