//! Metrics collection module
//!
//! Tracks per-category lookup outcomes and batch-level search counts.

use crate::search::Category;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
struct CategoryCounters {
    attempts: AtomicU64,
    successes: AtomicU64,
    errors: AtomicU64,
    skipped: AtomicU64,
    /// Sum of successful lookup times in microseconds
    response_time_us: AtomicU64,
}

/// Search metrics collector
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total search count
    total_searches: AtomicU64,
    /// Searches that returned before every branch completed
    interrupted_searches: AtomicU64,
    categories: [CategoryCounters; 3],
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    fn counters(&self, category: Category) -> &CategoryCounters {
        &self.categories[category.index()]
    }

    /// Increment total search count
    pub fn inc_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_interrupted(&self) {
        self.interrupted_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a category excluded by a zero limit
    pub fn record_skipped(&self, category: Category) {
        self.counters(category).skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup dispatched to the data source
    pub fn record_attempt(&self, category: Category) {
        self.counters(category).attempts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that completed successfully
    pub fn record_success(&self, category: Category, elapsed: Duration) {
        let counters = self.counters(category);
        counters.successes.fetch_add(1, Ordering::Relaxed);
        counters
            .response_time_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    /// Record a lookup that failed
    pub fn record_error(&self, category: Category) {
        self.counters(category).errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    pub fn get_interrupted_searches(&self) -> u64 {
        self.interrupted_searches.load(Ordering::Relaxed)
    }

    /// Average successful response time for a category
    pub fn get_avg_response_time(&self, category: Category) -> Option<Duration> {
        let counters = self.counters(category);
        let successes = counters.successes.load(Ordering::Relaxed);
        if successes == 0 {
            return None;
        }
        let total = counters.response_time_us.load(Ordering::Relaxed);
        Some(Duration::from_micros(total / successes))
    }

    /// Percentage of completed lookups that succeeded
    pub fn get_reliability(&self, category: Category) -> f64 {
        let counters = self.counters(category);
        let successes = counters.successes.load(Ordering::Relaxed);
        let errors = counters.errors.load(Ordering::Relaxed);

        let total = successes + errors;
        if total == 0 {
            100.0
        } else {
            (successes as f64 / total as f64) * 100.0
        }
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        let categories = Category::ALL
            .iter()
            .map(|&category| {
                let counters = self.counters(category);
                (
                    category.as_str().to_string(),
                    CategoryStats {
                        attempts: counters.attempts.load(Ordering::Relaxed),
                        successes: counters.successes.load(Ordering::Relaxed),
                        errors: counters.errors.load(Ordering::Relaxed),
                        skipped: counters.skipped.load(Ordering::Relaxed),
                        avg_response_time_ms: self
                            .get_avg_response_time(category)
                            .map(|d| d.as_secs_f64() * 1000.0),
                        reliability: self.get_reliability(category),
                    },
                )
            })
            .collect();

        MetricsSnapshot {
            total_searches: self.get_total_searches(),
            interrupted_searches: self.get_interrupted_searches(),
            categories,
        }
    }
}

/// Serializable view of [`Metrics`]
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_searches: u64,
    pub interrupted_searches: u64,
    pub categories: BTreeMap<String, CategoryStats>,
}

/// Statistics for a single category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStats {
    pub attempts: u64,
    pub successes: u64,
    pub errors: u64,
    pub skipped: u64,
    pub avg_response_time_ms: Option<f64>,
    pub reliability: f64,
}
