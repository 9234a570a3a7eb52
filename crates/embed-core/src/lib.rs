//! Shared primitives for the embed engine.
//!
//! This crate provides:
//! - `OwnerId` - Identifier of the collection owner
//! - `CollectionKind` - The four embeddable collection types
//! - `EmbedConfig` - Per-instance configuration read from the host page
//! - `Clock` - Injectable time source
//! - `ConfigError` - Initialization failures

mod clock;
mod collection;
mod config;
mod error;
mod ids;

pub use clock::*;
pub use collection::*;
pub use config::*;
pub use error::*;
pub use ids::*;
