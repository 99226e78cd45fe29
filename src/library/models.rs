//! Catalog entities returned by the data source

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An artist in the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub album_count: u32,
    pub song_count: u32,
    /// User rating, 0 (unrated) to 5
    pub rating: u8,
    pub starred: bool,
    pub starred_at: Option<DateTime<Utc>>,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Identifier of the artist image
    pub fn cover_art_id(&self) -> String {
        format!("ar-{}", self.id)
    }

    /// Text matched against search queries
    pub fn search_text(&self) -> String {
        self.name.clone()
    }
}

/// An album in the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub artist_id: String,
    pub year: Option<u16>,
    pub genre: Option<String>,
    pub song_count: u32,
    /// Total duration in seconds
    pub duration: f32,
    pub rating: u8,
    pub starred: bool,
    pub starred_at: Option<DateTime<Utc>>,
}

impl Album {
    pub fn new(id: impl Into<String>, name: impl Into<String>, artist: &Artist) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.name.clone(),
            artist_id: artist.id.clone(),
            ..Default::default()
        }
    }

    pub fn cover_art_id(&self) -> String {
        format!("al-{}", self.id)
    }

    pub fn search_text(&self) -> String {
        format!("{} {}", self.name, self.artist)
    }
}

/// A single track (media file) in the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaFile {
    pub id: String,
    pub title: String,
    pub album: String,
    pub album_id: String,
    pub artist: String,
    pub artist_id: String,
    pub track: Option<u32>,
    pub disc: Option<u32>,
    pub year: Option<u16>,
    pub genre: Option<String>,
    /// Duration in seconds
    pub duration: f32,
    /// Bit rate in kbps
    pub bit_rate: u32,
    /// File size in bytes
    pub size: u64,
    pub suffix: String,
    pub content_type: String,
    pub path: String,
    pub rating: u8,
    pub starred: bool,
    pub starred_at: Option<DateTime<Utc>>,
}

impl MediaFile {
    pub fn new(id: impl Into<String>, title: impl Into<String>, album: &Album) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            album: album.name.clone(),
            album_id: album.id.clone(),
            artist: album.artist.clone(),
            artist_id: album.artist_id.clone(),
            year: album.year,
            genre: album.genre.clone(),
            ..Default::default()
        }
    }

    pub fn cover_art_id(&self) -> String {
        format!("mf-{}", self.id)
    }

    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.album, self.artist)
    }
}
