//! # OpenMusic Core
//!
//! Core types, traits, and error definitions for the OpenMusic catalog.
//! Every other crate in the workspace builds on the identifiers, entities,
//! and the [`CatalogError`] taxonomy defined here.

pub mod domain;
pub mod error;
pub mod id;
pub mod provenance;
pub mod result;
pub mod telemetry;
pub mod traits;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use provenance::*;
pub use result::*;
pub use traits::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
