//! # OpenMusic Service
//!
//! Business operations on top of the repositories:
//!
//! - [`PlaylistAccessResolver`]: owner check, then collaborator check.
//! - [`PlaylistService`], [`AlbumLikeService`], [`ExportService`].
//! - [`CatalogModule`]: explicit wiring of pool, cache, producer,
//!   repositories and services, with a defined start and shutdown.

pub mod album_like_service;
pub mod authorization;
pub mod export_service;
pub mod r#impl;
pub mod module;
pub mod playlist_service;

#[cfg(test)]
pub(crate) mod testing;

pub use album_like_service::AlbumLikeService;
pub use authorization::{AccessDecision, AccessRoute, PlaylistAccessResolver};
pub use export_service::ExportService;
pub use module::{CatalogModule, Repositories};
pub use playlist_service::PlaylistService;
pub use r#impl::{AlbumLikeServiceImpl, ExportServiceImpl, PlaylistServiceImpl};
