//! Search request and aggregate result models

use crate::library::{Album, Artist, MediaFile};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result category searched by one branch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Songs,
    Albums,
    Artists,
}

impl Category {
    /// All categories, in dispatch order
    pub const ALL: [Category; 3] = [Category::Songs, Category::Albums, Category::Artists];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Songs => "songs",
            Self::Albums => "albums",
            Self::Artists => "artists",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Songs => 0,
            Self::Albums => 1,
            Self::Artists => 2,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Paging window for one category; a limit of zero excludes the category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryWindow {
    pub offset: usize,
    pub limit: usize,
}

impl CategoryWindow {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Window that skips the category entirely
    pub fn skip() -> Self {
        Self::default()
    }

    pub fn is_skipped(&self) -> bool {
        self.limit == 0
    }
}

/// A search over every category for one raw query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query as sent by the client, before normalization
    pub query: String,
    pub songs: CategoryWindow,
    pub albums: CategoryWindow,
    pub artists: CategoryWindow,
}

impl SearchRequest {
    /// Request with the same window for every category
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        let window = CategoryWindow::new(0, limit);
        Self {
            query: query.into(),
            songs: window,
            albums: window,
            artists: window,
        }
    }

    pub fn with_songs(mut self, offset: usize, limit: usize) -> Self {
        self.songs = CategoryWindow::new(offset, limit);
        self
    }

    pub fn with_albums(mut self, offset: usize, limit: usize) -> Self {
        self.albums = CategoryWindow::new(offset, limit);
        self
    }

    pub fn with_artists(mut self, offset: usize, limit: usize) -> Self {
        self.artists = CategoryWindow::new(offset, limit);
        self
    }

    /// Window for a category
    pub fn window(&self, category: Category) -> CategoryWindow {
        match category {
            Category::Songs => self.songs,
            Category::Albums => self.albums,
            Category::Artists => self.artists,
        }
    }
}

/// Aggregate of one search; every category is always present
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub songs: Vec<MediaFile>,
    pub albums: Vec<Album>,
    pub artists: Vec<Artist>,
    /// Wall-clock time of the whole batch
    pub elapsed: Duration,
    /// Whether cancellation fired before every branch joined
    pub interrupted: bool,
}

impl SearchResults {
    /// Total number of entities across categories
    pub fn total(&self) -> usize {
        self.songs.len() + self.albums.len() + self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
