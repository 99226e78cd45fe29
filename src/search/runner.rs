//! Single-category branch execution
//!
//! A branch runs one lookup on its own task and races it against the shared
//! cancellation token. When cancellation wins, the lookup is abandoned: it
//! keeps running to completion in the background and its outcome is dropped,
//! except for the log line it emits when it finishes.

use super::models::{Category, CategoryWindow};
use crate::error::Result;
use crate::metrics::Metrics;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{error, trace};

/// Run one category lookup, returning its value or the empty value
///
/// A zero limit skips the lookup entirely. Lookup failures are logged and
/// degrade to `T::default()`. Never returns an error.
pub async fn run_branch<T, F, Fut>(
    cancel: &CancellationToken,
    category: Category,
    metrics: &Arc<Metrics>,
    search: F,
    query: Arc<str>,
    window: CategoryWindow,
) -> T
where
    T: Default + Send + 'static,
    F: FnOnce(Arc<str>, usize, usize) -> Fut + Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    if window.is_skipped() {
        metrics.record_skipped(category);
        return T::default();
    }

    metrics.record_attempt(category);
    let (done_tx, done_rx) = oneshot::channel();
    let metrics = Arc::clone(metrics);

    tokio::spawn(async move {
        let start = Instant::now();
        let value = match search(Arc::clone(&query), window.offset, window.limit).await {
            Ok(value) => {
                let elapsed = start.elapsed();
                metrics.record_success(category, elapsed);
                trace!(query = %query, ?elapsed, "Search for {} completed", category);
                value
            }
            Err(e) => {
                metrics.record_error(category);
                error!(query = %query, error = %e, "Error searching {}", category);
                T::default()
            }
        };
        // The receiver is gone once the waiter gave up
        let _ = done_tx.send(value);
    });

    tokio::select! {
        result = done_rx => result.unwrap_or_default(),
        _ = cancel.cancelled() => T::default(),
    }
}
