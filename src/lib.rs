//! catalog-search: concurrent fan-out search over a music catalog
//!
//! One query is dispatched to the song, album and artist lookups at the same
//! time. The results are joined under a shared cancellation token, so a slow
//! lookup can delay a response only until the deadline or until the client
//! disconnects, and a failed lookup only empties its own category.

pub mod config;
pub mod error;
pub mod library;
pub mod metrics;
pub mod query;
pub mod search;
pub mod web;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::Settings;
pub use error::{CatalogError, Result};
pub use library::{DataStore, MemoryLibrary, Repository};
pub use search::{Search, SearchRequest, SearchResults};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
