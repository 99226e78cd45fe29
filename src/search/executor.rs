//! Search execution and orchestration

use super::models::{Category, SearchRequest, SearchResults};
use super::runner::run_branch;
use crate::library::DataStore;
use crate::metrics::Metrics;
use crate::query;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tokio_util::task::AbortOnDropHandle;
use tracing::{debug, warn};

/// Search executor that fans one query out to every category
pub struct Search {
    /// Data source answering the lookups
    store: Arc<dyn DataStore>,
    /// Outcome counters
    metrics: Arc<Metrics>,
    /// Deadline applied by [`Search::search`]
    default_timeout: Option<Duration>,
}

impl Search {
    /// Create a new search executor
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self {
            store,
            metrics: Arc::new(Metrics::new()),
            default_timeout: None,
        }
    }

    /// Set default timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Share an existing metrics collector
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout
    }

    /// Search under the default deadline, if one is configured
    pub async fn search(&self, parent: &CancellationToken, request: &SearchRequest) -> SearchResults {
        match self.default_timeout {
            Some(timeout) => self.search_with_deadline(parent, request, timeout).await,
            None => self.search_all(parent, request).await,
        }
    }

    /// Search under a token that also fires once `timeout` has elapsed
    pub async fn search_with_deadline(
        &self,
        parent: &CancellationToken,
        request: &SearchRequest,
        timeout: Duration,
    ) -> SearchResults {
        let cancel = parent.child_token();
        let deadline = cancel.clone();
        let _timer = AbortOnDropHandle::new(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            deadline.cancel();
        }));

        self.search_all(&cancel, request).await
    }

    /// Search every category concurrently and join all branches
    ///
    /// Always returns one container per category. Once `cancel` fires, every
    /// branch still waiting gives up and its category stays empty.
    pub async fn search_all(&self, cancel: &CancellationToken, request: &SearchRequest) -> SearchResults {
        let start = Instant::now();
        self.metrics.inc_search();

        let query: Arc<str> = Arc::from(query::normalize(&request.query));

        let songs_repo = self.store.media_files();
        let albums_repo = self.store.albums();
        let artists_repo = self.store.artists();

        let (songs, albums, artists) = tokio::join!(
            run_branch(
                cancel,
                Category::Songs,
                &self.metrics,
                move |q, offset, size| async move { songs_repo.search(&q, offset, size).await },
                Arc::clone(&query),
                request.window(Category::Songs),
            ),
            run_branch(
                cancel,
                Category::Albums,
                &self.metrics,
                move |q, offset, size| async move { albums_repo.search(&q, offset, size).await },
                Arc::clone(&query),
                request.window(Category::Albums),
            ),
            run_branch(
                cancel,
                Category::Artists,
                &self.metrics,
                move |q, offset, size| async move { artists_repo.search(&q, offset, size).await },
                Arc::clone(&query),
                request.window(Category::Artists),
            ),
        );

        let elapsed = start.elapsed();
        let interrupted = cancel.is_cancelled();

        if !interrupted {
            debug!(
                query = %request.query,
                ?elapsed,
                "Search resulted in {} songs, {} albums and {} artists",
                songs.len(),
                albums.len(),
                artists.len()
            );
        } else {
            self.metrics.record_interrupted();
            warn!(query = %request.query, ?elapsed, "Search was interrupted");
        }

        SearchResults {
            songs,
            albums,
            artists,
            elapsed,
            interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CatalogError, Result};
    use crate::library::{Album, Artist, MediaFile, Repository};
    use crate::test_utils::LogCapture;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tracing::Level;

    /// Repository returning canned rows and recording every call
    struct MockRepository<T> {
        rows: Vec<T>,
        delay: Duration,
        fail: bool,
        calls: AtomicUsize,
        queries: Mutex<Vec<String>>,
    }

    impl<T> MockRepository<T> {
        fn new(rows: Vec<T>) -> Self {
            Self {
                rows,
                delay: Duration::ZERO,
                fail: false,
                calls: AtomicUsize::new(0),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl<T: Clone + Send + Sync> Repository<T> for MockRepository<T> {
        async fn search(&self, query: &str, offset: usize, size: usize) -> Result<Vec<T>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail {
                return Err(CatalogError::Backend("database is locked".to_string()));
            }
            Ok(self.rows.iter().skip(offset).take(size).cloned().collect())
        }
    }

    struct MockStore {
        songs: Arc<MockRepository<MediaFile>>,
        albums: Arc<MockRepository<Album>>,
        artists: Arc<MockRepository<Artist>>,
    }

    impl DataStore for MockStore {
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

    fn beatles() -> (Vec<MediaFile>, Vec<Album>, Vec<Artist>) {
        let artist = Artist::new("ar1", "The Beatles");
        let album = Album::new("al1", "Abbey Road", &artist);
        let songs = vec![
            MediaFile::new("mf1", "Come Together", &album),
            MediaFile::new("mf2", "Something", &album),
            MediaFile::new("mf3", "Octopus's Garden", &album),
        ];
        (songs, vec![album], vec![artist])
    }

    fn store(
        songs: MockRepository<MediaFile>,
        albums: MockRepository<Album>,
        artists: MockRepository<Artist>,
    ) -> Arc<MockStore> {
        Arc::new(MockStore {
            songs: Arc::new(songs),
            albums: Arc::new(albums),
            artists: Arc::new(artists),
        })
    }

    #[tokio::test]
    async fn test_zero_limits_never_call_repositories() {
        let (songs, albums, artists) = beatles();
        let store = store(
            MockRepository::new(songs),
            MockRepository::new(albums),
            MockRepository::new(artists),
        );
        let search = Search::new(store.clone());

        let request = SearchRequest::new("beatles", 0);
        let results = search.search_all(&CancellationToken::new(), &request).await;

        assert!(results.is_empty());
        assert!(!results.interrupted);
        assert_eq!(store.songs.calls(), 0);
        assert_eq!(store.albums.calls(), 0);
        assert_eq!(store.artists.calls(), 0);
    }

    #[tokio::test]
    async fn test_returns_every_category_unchanged() {
        let (songs, albums, artists) = beatles();
        let store = store(
            MockRepository::new(songs.clone()),
            MockRepository::new(albums.clone()),
            MockRepository::new(artists.clone()),
        );
        let search = Search::new(store);

        let request = SearchRequest::new("beatles", 20);
        let results = search.search_all(&CancellationToken::new(), &request).await;

        assert_eq!(results.songs, songs);
        assert_eq!(results.albums, albums);
        assert_eq!(results.artists, artists);
        assert!(!results.interrupted);
    }

    #[tokio::test]
    async fn test_failing_category_is_empty_others_intact() {
        let (songs, albums, artists) = beatles();
        let store = store(
            MockRepository::new(songs.clone()),
            MockRepository::new(albums).failing(),
            MockRepository::new(artists.clone()),
        );
        let search = Search::new(store.clone());

        let request = SearchRequest::new("beatles", 20);
        let results = search.search_all(&CancellationToken::new(), &request).await;

        assert_eq!(results.songs, songs);
        assert!(results.albums.is_empty());
        assert_eq!(results.artists, artists);
        assert!(!results.interrupted);
        assert_eq!(store.albums.calls(), 1);
        assert_eq!(search.metrics().get_reliability(Category::Albums), 0.0);
    }

    #[tokio::test]
    async fn test_cancellation_returns_promptly() {
        let (songs, albums, artists) = beatles();
        let store = store(
            MockRepository::new(songs).slow(Duration::from_secs(10)),
            MockRepository::new(albums).slow(Duration::from_secs(10)),
            MockRepository::new(artists.clone()),
        );
        let search = Search::new(store);

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let request = SearchRequest::new("beatles", 20);
        let results = search.search_all(&cancel, &request).await;

        assert!(start.elapsed() < Duration::from_secs(2));
        assert!(results.interrupted);
        assert!(results.songs.is_empty());
        assert!(results.albums.is_empty());
        // The fast branch completed before cancellation fired
        assert_eq!(results.artists, artists);
        assert_eq!(search.metrics().get_interrupted_searches(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_leaves_everything_empty() {
        let (songs, albums, artists) = beatles();
        let store = store(
            MockRepository::new(songs).slow(Duration::from_secs(10)),
            MockRepository::new(albums).slow(Duration::from_secs(10)),
            MockRepository::new(artists).slow(Duration::from_secs(10)),
        );
        let search = Search::new(store);

        let cancel = CancellationToken::new();
        cancel.cancel();

        let start = Instant::now();
        let results = search
            .search_all(&cancel, &SearchRequest::new("beatles", 20))
            .await;

        assert!(start.elapsed() < Duration::from_secs(2));
        assert!(results.interrupted);
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_deadline_interrupts_slow_branch() {
        let (songs, albums, artists) = beatles();
        let store = store(
            MockRepository::new(songs.clone()),
            MockRepository::new(albums.clone()),
            MockRepository::new(artists).slow(Duration::from_secs(10)),
        );
        let search = Search::new(store).with_timeout(Duration::from_millis(100));

        let start = Instant::now();
        let parent = CancellationToken::new();
        let results = search.search(&parent, &SearchRequest::new("beatles", 20)).await;

        assert!(start.elapsed() < Duration::from_secs(2));
        assert!(results.interrupted);
        assert_eq!(results.songs, songs);
        assert_eq!(results.albums, albums);
        assert!(results.artists.is_empty());
        // The deadline does not cancel the caller's token
        assert!(!parent.is_cancelled());
    }

    #[tokio::test]
    async fn test_every_branch_sees_the_same_normalized_query() {
        let (songs, albums, artists) = beatles();
        let store = store(
            MockRepository::new(songs),
            MockRepository::new(albums),
            MockRepository::new(artists),
        );
        let search = Search::new(store.clone());

        for raw in ["Café*", "cafe", "CAFE*"] {
            search
                .search_all(&CancellationToken::new(), &SearchRequest::new(raw, 5))
                .await;
        }

        let expected = vec!["cafe".to_string(); 3];
        assert_eq!(store.songs.queries(), expected);
        assert_eq!(store.albums.queries(), expected);
        assert_eq!(store.artists.queries(), expected);
    }

    #[tokio::test]
    async fn test_beatles_scenario() {
        let artist = Artist::new("ar1", "The Beatles");
        let album = Album::new("al1", "Help!", &artist);
        let songs = vec![
            MediaFile::new("mf1", "Help!", &album),
            MediaFile::new("mf2", "Yesterday", &album),
            MediaFile::new("mf3", "Ticket to Ride", &album),
        ];
        let store = store(
            MockRepository::new(songs.clone()),
            MockRepository::new(vec![album]),
            MockRepository::new(vec![artist.clone(), Artist::new("ar2", "Beatles Revival")]),
        );
        let search = Search::new(store.clone());

        let request = SearchRequest::new("Beatles*", 20)
            .with_artists(0, 1)
            .with_albums(0, 0)
            .with_songs(0, 2);
        let results = search.search_all(&CancellationToken::new(), &request).await;

        assert_eq!(results.artists, vec![artist]);
        assert!(results.albums.is_empty());
        assert_eq!(results.songs, songs[..2].to_vec());
        assert_eq!(store.albums.calls(), 0);
        assert_eq!(store.artists.queries(), vec!["beatles".to_string()]);
    }

    #[tokio::test]
    async fn test_completed_search_logs_summary() {
        let (logs, _guard) = LogCapture::install();
        let (songs, albums, artists) = beatles();
        let store = store(
            MockRepository::new(songs),
            MockRepository::new(albums),
            MockRepository::new(artists),
        );
        let search = Search::new(store);

        search
            .search_all(&CancellationToken::new(), &SearchRequest::new("beatles", 20))
            .await;

        assert_eq!(
            logs.matching(Level::DEBUG, "Search resulted in 3 songs, 1 albums and 1 artists")
                .len(),
            1
        );
        assert!(logs.matching(Level::WARN, "Search was interrupted").is_empty());
    }

    #[tokio::test]
    async fn test_interrupted_search_logs_warning() {
        let (logs, _guard) = LogCapture::install();
        let (songs, albums, artists) = beatles();
        let store = store(
            MockRepository::new(songs).slow(Duration::from_secs(10)),
            MockRepository::new(albums).slow(Duration::from_secs(10)),
            MockRepository::new(artists).slow(Duration::from_secs(10)),
        );
        let search = Search::new(store);

        let cancel = CancellationToken::new();
        cancel.cancel();
        search.search_all(&cancel, &SearchRequest::new("beatles", 20)).await;

        assert_eq!(logs.matching(Level::WARN, "Search was interrupted").len(), 1);
        assert!(logs.matching(Level::DEBUG, "Search resulted in").is_empty());
    }
}
