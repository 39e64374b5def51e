//! Debounced, cancel-aware query pipeline.

use crate::api::SearchApi;
use crate::model::{FilterSet, ResultPage, SearchError, PAGE_SIZE};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

// ===== SearchOutcome =====

/// Result of a pipeline call that did not fail outright.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The trailing call of its quiet window: a page was fetched.
    Page(ResultPage),
    /// A newer call started before this one issued (or finished) its
    /// network I/O; the caller must discard this outcome silently.
    Superseded,
}

// ===== QueryPipeline =====

/// Turns `(filters, page)` into rate-limited requests against the search
/// collaborator.
///
/// # Debouncing
///
/// Every call claims a ticket from a shared monotonic counter, sleeps the
/// quiet window, and only proceeds to network I/O if no newer ticket has
/// been claimed meanwhile. Rapid successive calls therefore collapse to the
/// single trailing call with the latest arguments, one network request per
/// quiet window.
///
/// # Cancellation
///
/// Cooperative, checked on arrival: there is no hard abort. A call that
/// lost its ticket (before or after its I/O completed) resolves as
/// [`SearchOutcome::Superseded`] and its result is never observed.
///
/// # Timeouts
///
/// Each issued request is bounded by a deadline resolving to
/// [`SearchError::TimedOut`], so the session can never hang in `Loading`.
#[derive(Clone)]
pub struct QueryPipeline {
    api: Arc<dyn SearchApi>,
    debounce: Duration,
    timeout: Duration,
    latest: Arc<AtomicU64>,
}

impl QueryPipeline {
    /// Pipeline over `api` with the given quiet window and request deadline.
    pub fn new(api: Arc<dyn SearchApi>, debounce: Duration, timeout: Duration) -> Self {
        Self {
            api,
            debounce,
            timeout,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Fetch one page of results for `filters`.
    ///
    /// `page` is 1-based; 0 is a local contract violation and is rejected
    /// without claiming a ticket or touching the network.
    pub async fn search(
        &self,
        filters: FilterSet,
        page: u32,
    ) -> Result<SearchOutcome, SearchError> {
        if page == 0 {
            return Err(SearchError::InvalidPage(page));
        }

        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.debounce).await;
        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!(ticket, page, "call superseded during quiet window");
            return Ok(SearchOutcome::Superseded);
        }

        debug!(ticket, page, ?filters, "issuing page request");
        let fetch = self.api.search(&filters, page, PAGE_SIZE);
        let items = match tokio::time::timeout(self.timeout, fetch).await {
            Ok(Ok(items)) => items,
            Ok(Err(e)) => {
                warn!(page, error = %e, "page request failed");
                return Err(e);
            }
            Err(_) => {
                warn!(page, "page request timed out");
                return Err(SearchError::TimedOut);
            }
        };

        // A newer call may have started while our request was in flight.
        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!(ticket, page, "discarding response of superseded call");
            return Ok(SearchOutcome::Superseded);
        }

        Ok(SearchOutcome::Page(ResultPage {
            items,
            requested_page: page,
            requested_filters: filters,
        }))
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
