//! Subsonic response bodies
//!
//! Translates aggregate search results into the `subsonic-response` JSON
//! envelope understood by Subsonic clients.

use crate::library::{Album, Artist, MediaFile};
use crate::search::SearchResults;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Subsonic API version advertised in every response
pub const API_VERSION: &str = "1.16.1";

/// Size requested for artist images
const ARTIST_IMAGE_SIZE: u32 = 600;

/// Top-level wrapper required by Subsonic clients
#[derive(Debug, Serialize)]
pub struct Envelope {
    #[serde(rename = "subsonic-response")]
    pub response: Subsonic,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsonic {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(rename = "type")]
    pub server_type: &'static str,
    pub server_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_result2: Option<SearchResult2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_result3: Option<SearchResult3>,
}

impl Subsonic {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: API_VERSION,
            server_type: "catalog-search",
            server_version: crate::VERSION,
            error: None,
            search_result2: None,
            search_result3: None,
        }
    }

    pub fn ok() -> Self {
        Self::new("ok")
    }

    pub fn failed(code: u32, message: impl Into<String>) -> Self {
        let mut response = Self::new("failed");
        response.error = Some(ErrorBody {
            code,
            message: message.into(),
        });
        response
    }

    pub fn into_envelope(self) -> Envelope {
        Envelope { response: self }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u32,
    pub message: String,
}

#[derive(Debug, Default, Serialize)]
pub struct SearchResult2 {
    pub artist: Vec<ArtistEntry>,
    pub album: Vec<Child>,
    pub song: Vec<Child>,
}

#[derive(Debug, Default, Serialize)]
pub struct SearchResult3 {
    pub artist: Vec<ArtistId3>,
    pub album: Vec<Child>,
    pub song: Vec<Child>,
}

/// Artist as listed by the folder-based `search2` endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistEntry {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub album_count: u32,
    #[serde(skip_serializing_if = "is_zero_u8")]
    pub user_rating: u8,
    pub cover_art: String,
    pub artist_image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<DateTime<Utc>>,
}

/// Artist as listed by the tag-based `search3` endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistId3 {
    pub id: String,
    pub name: String,
    pub cover_art: String,
    pub album_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_zero_u8")]
    pub user_rating: u8,
    pub artist_image_url: String,
}

/// Generic Subsonic directory entry used for albums and songs
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent: String,
    pub is_dir: bool,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub album: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub cover_art: String,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub size: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub suffix: String,
    pub duration: u32,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub bit_rate: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(skip_serializing_if = "is_zero_u8")]
    pub user_rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_count: Option<u32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub album_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub artist_id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub media_type: &'static str,
}

fn is_zero_u8(value: &u8) -> bool {
    *value == 0
}

fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

fn starred(flag: bool, at: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    if flag {
        at
    } else {
        None
    }
}

/// Public URL of an artist image
pub fn artist_image_url(base_url: &str, artist: &Artist) -> String {
    format!(
        "{}/rest/getCoverArt?id={}&size={}",
        base_url.trim_end_matches('/'),
        artist.cover_art_id(),
        ARTIST_IMAGE_SIZE
    )
}

pub fn child_from_album(album: &Album) -> Child {
    Child {
        id: album.id.clone(),
        parent: album.artist_id.clone(),
        is_dir: true,
        title: album.name.clone(),
        name: Some(album.name.clone()),
        album: album.name.clone(),
        artist: album.artist.clone(),
        year: album.year,
        genre: album.genre.clone(),
        cover_art: album.cover_art_id(),
        duration: album.duration as u32,
        user_rating: album.rating,
        starred: starred(album.starred, album.starred_at),
        song_count: Some(album.song_count),
        artist_id: album.artist_id.clone(),
        media_type: "album",
        ..Default::default()
    }
}

pub fn child_from_media_file(song: &MediaFile) -> Child {
    Child {
        id: song.id.clone(),
        parent: song.album_id.clone(),
        is_dir: false,
        title: song.title.clone(),
        album: song.album.clone(),
        artist: song.artist.clone(),
        track: song.track,
        year: song.year,
        genre: song.genre.clone(),
        cover_art: song.cover_art_id(),
        size: song.size,
        content_type: song.content_type.clone(),
        suffix: song.suffix.clone(),
        duration: song.duration as u32,
        bit_rate: song.bit_rate,
        path: song.path.clone(),
        user_rating: song.rating,
        starred: starred(song.starred, song.starred_at),
        disc_number: song.disc,
        album_id: song.album_id.clone(),
        artist_id: song.artist_id.clone(),
        kind: Some("music"),
        media_type: "song",
        ..Default::default()
    }
}

/// Body of a `search2` response
pub fn search_result2(results: &SearchResults, base_url: &str) -> SearchResult2 {
    SearchResult2 {
        artist: results
            .artists
            .iter()
            .map(|artist| ArtistEntry {
                id: artist.id.clone(),
                name: artist.name.clone(),
                album_count: artist.album_count,
                user_rating: artist.rating,
                cover_art: artist.cover_art_id(),
                artist_image_url: artist_image_url(base_url, artist),
                starred: starred(artist.starred, artist.starred_at),
            })
            .collect(),
        album: results.albums.iter().map(child_from_album).collect(),
        song: results.songs.iter().map(child_from_media_file).collect(),
    }
}

/// Body of a `search3` response
pub fn search_result3(results: &SearchResults, base_url: &str) -> SearchResult3 {
    SearchResult3 {
        artist: results
            .artists
            .iter()
            .map(|artist| ArtistId3 {
                id: artist.id.clone(),
                name: artist.name.clone(),
                cover_art: artist.cover_art_id(),
                album_count: artist.album_count,
                starred: starred(artist.starred, artist.starred_at),
                user_rating: artist.rating,
                artist_image_url: artist_image_url(base_url, artist),
            })
            .collect(),
        album: results.albums.iter().map(child_from_album).collect(),
        song: results.songs.iter().map(child_from_media_file).collect(),
    }
}
