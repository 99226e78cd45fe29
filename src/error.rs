//! Error types for catalog access

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised by a data source while answering a lookup.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The backing store failed to answer.
    #[error("Catalog backend failed: {0}")]
    Backend(String),

    /// Reading a catalog file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A catalog file could not be parsed.
    #[error("Failed to parse catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The catalog content is inconsistent.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}
