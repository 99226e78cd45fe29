//! Application state shared across handlers

use crate::config::Settings;
use crate::library::DataStore;
use crate::metrics::Metrics;
use crate::search::Search;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search executor
    pub search: Arc<Search>,
    /// Outcome counters, shared with the executor
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, store: Arc<dyn DataStore>) -> Self {
        let metrics = Arc::new(Metrics::new());
        let mut search = Search::new(store).with_metrics(metrics.clone());
        if let Some(timeout) = settings.search.timeout_duration() {
            search = search.with_timeout(timeout);
        }

        Self {
            settings: Arc::new(settings),
            search: Arc::new(search),
            metrics,
        }
    }

    /// Configured public base URL, if any
    pub fn base_url(&self) -> Option<&str> {
        self.settings.server.base_url.as_deref()
    }
}
