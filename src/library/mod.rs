//! Data source abstraction
//!
//! The search core treats lookups as opaque, possibly slow, possibly failing
//! operations. Each entity kind is served by a [`Repository`]; a
//! [`DataStore`] hands out one repository per kind.

mod memory;
mod models;

pub use memory::{CatalogFile, MemoryLibrary};
pub use models::{Album, Artist, MediaFile};

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Lookup over a single kind of catalog entity
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Find entities matching an already-normalized query
    async fn search(&self, query: &str, offset: usize, size: usize) -> Result<Vec<T>>;
}

/// Provider of per-kind repositories
pub trait DataStore: Send + Sync {
    fn media_files(&self) -> Arc<dyn Repository<MediaFile>>;

    fn albums(&self) -> Arc<dyn Repository<Album>>;

    fn artists(&self) -> Arc<dyn Repository<Artist>>;
}
