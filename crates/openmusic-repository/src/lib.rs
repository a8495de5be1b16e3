//! # OpenMusic Repository
//!
//! Four-layer data access hierarchy:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn SongRepository>   (domain interface)
//! SongRepositoryImpl             (repository impl: DAOs + cache-aside + invalidation)
//!   ↓  Arc<dyn SongDao>          (DAO interface)
//! PgSongDaoImpl                  (DAO impl: PostgreSQL / SQLx)
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs                      ← repository traits
//!   cache_aside.rs                 ← read-through helper
//!   context.rs                     ← cache, invalidator, query timeout
//!   impl/
//!     *_repository_impl.rs         ← repository implementations
//!   dao/
//!     *_dao.rs                     ← DAO traits
//!     impl/postgres/
//!       *_dao_impl.rs              ← PostgreSQL DAOs
//! ```
//!
//! Reads go through [`CacheAside`]; writes commit through a DAO, then hand a
//! [`Mutation`](openmusic_cache::Mutation) to the
//! [`Invalidator`](openmusic_cache::Invalidator) before returning.

pub mod cache_aside;
pub mod context;
pub mod dao;
pub mod pool;
pub mod traits;
pub mod r#impl;

#[cfg(test)]
pub(crate) mod testing;

pub use cache_aside::CacheAside;
pub use context::RepositoryContext;
pub use dao::{AlbumDao, AlbumLikeDao, CollaborationDao, PlaylistDao, SongDao};
pub use pool::*;
pub use traits::*;
pub use r#impl::{
    AlbumLikeRepositoryImpl, AlbumRepositoryImpl, CollaborationRepositoryImpl,
    PlaylistRepositoryImpl, SongRepositoryImpl,
};

// Re-export DAO implementations for convenience
pub use dao::{
    PgAlbumDaoImpl, PgAlbumLikeDaoImpl, PgCollaborationDaoImpl, PgPlaylistDaoImpl, PgSongDaoImpl,
};
