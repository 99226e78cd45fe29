//! In-memory catalog
//!
//! Holds the whole catalog in memory and answers lookups with a linear scan.
//! A query matches an entity when every query word is a prefix of some word
//! of the entity's folded search text. Results keep catalog order.

use super::models::{Album, Artist, MediaFile};
use super::{DataStore, Repository};
use crate::error::{CatalogError, Result};
use crate::query;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// On-disk catalog layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub songs: Vec<MediaFile>,
}

/// Entities that can be matched against a query
trait Searchable {
    fn id(&self) -> &str;

    fn search_text(&self) -> String;
}

impl Searchable for Artist {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        Artist::search_text(self)
    }
}

impl Searchable for Album {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        Album::search_text(self)
    }
}

impl Searchable for MediaFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        MediaFile::search_text(self)
    }
}

/// Entities of one kind together with their folded words
struct Table<T> {
    rows: Vec<(Vec<String>, T)>,
}

impl<T: Searchable> Table<T> {
    fn build(kind: &str, entities: Vec<T>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(entities.len());

        for entity in entities {
            if !seen.insert(entity.id().to_string()) {
                return Err(CatalogError::InvalidCatalog(format!(
                    "duplicate {} id '{}'",
                    kind,
                    entity.id()
                )));
            }
            let folded = query::normalize(&entity.search_text());
            let words = query::words(&folded).map(str::to_string).collect();
            rows.push((words, entity));
        }

        Ok(Self { rows })
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

fn matches(terms: &[&str], words: &[String]) -> bool {
    terms
        .iter()
        .all(|term| words.iter().any(|word| word.starts_with(term)))
}

#[async_trait]
impl<T> Repository<T> for Table<T>
where
    T: Searchable + Clone + Send + Sync,
{
    async fn search(&self, query: &str, offset: usize, size: usize) -> Result<Vec<T>> {
        let terms: Vec<&str> = query::words(query).collect();

        Ok(self
            .rows
            .iter()
            .filter(|(words, _)| matches(&terms, words))
            .skip(offset)
            .take(size)
            .map(|(_, entity)| entity.clone())
            .collect())
    }
}

/// Catalog held entirely in memory
#[derive(Clone)]
pub struct MemoryLibrary {
    artists: Arc<Table<Artist>>,
    albums: Arc<Table<Album>>,
    songs: Arc<Table<MediaFile>>,
}

impl MemoryLibrary {
    /// Build a library from already-loaded entities
    pub fn new(catalog: CatalogFile) -> Result<Self> {
        Ok(Self {
            artists: Arc::new(Table::build("artist", catalog.artists)?),
            albums: Arc::new(Table::build("album", catalog.albums)?),
            songs: Arc::new(Table::build("song", catalog.songs)?),
        })
    }

    /// An empty library
    pub fn empty() -> Self {
        Self {
            artists: Arc::new(Table { rows: Vec::new() }),
            albums: Arc::new(Table { rows: Vec::new() }),
            songs: Arc::new(Table { rows: Vec::new() }),
        }
    }

    /// Load a library from a YAML catalog file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading catalog from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let catalog: CatalogFile = serde_yaml::from_str(&content)?;
        let library = Self::new(catalog)?;
        info!(
            "Loaded catalog with {} artists, {} albums and {} songs",
            library.artists.len(),
            library.albums.len(),
            library.songs.len()
        );
        Ok(library)
    }

    /// Entity counts as (artists, albums, songs)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.artists.len(), self.albums.len(), self.songs.len())
    }
}

impl Default for MemoryLibrary {
    fn default() -> Self {
        Self::empty()
    }
}

impl DataStore for MemoryLibrary {
    fn media_files(&self) -> Arc<dyn Repository<MediaFile>> {
        self.songs.clone()
    }

    fn albums(&self) -> Arc<dyn Repository<Album>> {
        self.albums.clone()
    }

    fn artists(&self) -> Arc<dyn Repository<Artist>> {
        self.artists.clone()
    }
}
