//! Search request parameters

use super::error::ApiError;
use crate::config::SearchSettings;
use crate::search::SearchRequest;
use serde::Deserialize;

/// Query parameters shared by `search2` and `search3`
///
/// Counts and offsets are kept as text so that malformed values fall back to
/// their defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: Option<String>,
    pub artist_count: Option<String>,
    pub artist_offset: Option<String>,
    pub album_count: Option<String>,
    pub album_offset: Option<String>,
    pub song_count: Option<String>,
    pub song_offset: Option<String>,
}

fn param_usize(value: Option<&str>, default: usize) -> usize {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl SearchParams {
    /// Validate the parameters and build a search request
    pub fn into_request(self, settings: &SearchSettings) -> Result<SearchRequest, ApiError> {
        let query = match self.query {
            Some(q) if !q.trim().is_empty() => q,
            _ => return Err(ApiError::MissingParameter("query")),
        };

        let count = |value: &Option<String>| {
            param_usize(value.as_deref(), settings.default_count).min(settings.max_count)
        };
        let offset = |value: &Option<String>| param_usize(value.as_deref(), 0);

        Ok(SearchRequest::new(query, settings.default_count)
            .with_artists(offset(&self.artist_offset), count(&self.artist_count))
            .with_albums(offset(&self.album_offset), count(&self.album_count))
            .with_songs(offset(&self.song_offset), count(&self.song_count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::CategoryWindow;

    fn params(query: &str) -> SearchParams {
        SearchParams {
            query: Some(query.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let request = params("beatles")
            .into_request(&SearchSettings::default())
            .unwrap();

        assert_eq!(request.query, "beatles");
        assert_eq!(request.artists, CategoryWindow::new(0, 20));
        assert_eq!(request.albums, CategoryWindow::new(0, 20));
        assert_eq!(request.songs, CategoryWindow::new(0, 20));
    }

    #[test]
    fn test_missing_or_blank_query() {
        let settings = SearchSettings::default();
        let missing = SearchParams::default().into_request(&settings);
        assert!(matches!(missing, Err(ApiError::MissingParameter("query"))));

        let blank = params("   ").into_request(&settings);
        assert!(matches!(blank, Err(ApiError::MissingParameter("query"))));
    }

    #[test]
    fn test_explicit_counts_and_offsets() {
        let mut p = params("Beatles*");
        p.artist_count = Some("1".to_string());
        p.album_count = Some("0".to_string());
        p.song_count = Some("2".to_string());
        p.song_offset = Some("4".to_string());

        let request = p.into_request(&SearchSettings::default()).unwrap();
        assert_eq!(request.artists, CategoryWindow::new(0, 1));
        assert!(request.albums.is_skipped());
        assert_eq!(request.songs, CategoryWindow::new(4, 2));
    }

    #[test]
    fn test_malformed_numbers_use_defaults() {
        let mut p = params("x");
        p.song_count = Some("lots".to_string());
        p.artist_offset = Some("-3".to_string());

        let request = p.into_request(&SearchSettings::default()).unwrap();
        assert_eq!(request.songs.limit, 20);
        assert_eq!(request.artists.offset, 0);
    }

    #[test]
    fn test_counts_are_capped() {
        let mut p = params("x");
        p.song_count = Some("100000".to_string());

        let request = p.into_request(&SearchSettings::default()).unwrap();
        assert_eq!(request.songs.limit, 500);
    }
}
