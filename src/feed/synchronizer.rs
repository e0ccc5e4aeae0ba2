//! Review feed synchronizer.
//!
//! [`ReviewFeed`] owns the newest-first review list shown on the site. It
//! loads the list from the remote store, inserts submissions optimistically,
//! dispatches them without waiting, and reconciles with a delayed re-fetch.
//! Remote failures never escape: they are logged and treated as "no data".
//!
//! All mutation goes through `&mut ReviewFeed`, so a single logical writer is
//! enforced by the borrow checker. The only suspension points are the store
//! calls.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::cache::LocalReviewCache;
use super::form::ReviewForm;
use super::gateway::ReviewStore;
use super::models::Review;
use super::order::sort_newest_first;
use super::pagination::{DEFAULT_PAGE_SIZE, ReviewPage, clamp_page, paginate};
use super::reconcile::{blend, reconcile};
use super::seed::seed_reviews;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Delay between an optimistic insert and the reconciling re-fetch.
pub const DEFAULT_REFETCH_DELAY: Duration = Duration::from_millis(800);

/// How remote rows combine with local data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// A non-empty remote snapshot replaces the local list outright.
    #[default]
    Authoritative,
    /// Remote rows merge with the local cache (or the seed) by author and
    /// text, and the merged list is written back to the cache.
    Blended,
}

/// Handle to the delayed re-fetch scheduled by [`ReviewFeed::submit`].
///
/// Pass it to [`ReviewFeed::settle`] to apply the re-fetched rows.
#[derive(Debug)]
#[must_use = "pass the pending refresh to ReviewFeed::settle to reconcile"]
pub struct PendingRefresh {
    review_id: String,
    task: Option<JoinHandle<Vec<Review>>>,
}

impl PendingRefresh {
    /// Identifier of the optimistically inserted review.
    #[must_use]
    pub fn review_id(&self) -> &str {
        &self.review_id
    }
}

/// In-memory, paginated, newest-first review list backed by a remote store.
pub struct ReviewFeed<S: ReviewStore + 'static> {
    store: Arc<S>,
    entries: Vec<Review>,
    current_page: usize,
    page_size: usize,
    mode: SyncMode,
    cache: Option<LocalReviewCache>,
    refetch_delay: Duration,
    telemetry: Arc<dyn TelemetrySink>,
    clock: fn() -> DateTime<Local>,
}

impl<S: ReviewStore + 'static> ReviewFeed<S> {
    /// Creates an empty feed in authoritative mode.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            entries: Vec::new(),
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            mode: SyncMode::Authoritative,
            cache: None,
            refetch_delay: DEFAULT_REFETCH_DELAY,
            telemetry: Arc::new(NoopTelemetrySink),
            clock: Local::now,
        }
    }

    /// Selects the sync mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: SyncMode) -> Self {
        self.mode = mode;
        self
    }

    /// Attaches the local cache consulted in blended mode.
    #[must_use]
    pub fn with_cache(mut self, cache: LocalReviewCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the number of reviews per page; zero is treated as one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Overrides the delay before the post-submission re-fetch.
    #[must_use]
    pub const fn with_refetch_delay(mut self, delay: Duration) -> Self {
        self.refetch_delay = delay;
        self
    }

    /// Routes telemetry events to `sink`.
    #[must_use]
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = sink;
        self
    }

    /// Replaces the clock used to stamp submissions.
    #[must_use]
    pub const fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    /// Starts the feed with the given entries, sorted newest first.
    #[must_use]
    pub fn with_entries(mut self, entries: Vec<Review>) -> Self {
        self.entries = entries;
        sort_newest_first(&mut self.entries);
        self
    }

    /// Returns every review, newest first.
    #[must_use]
    pub fn entries(&self) -> &[Review] {
        &self.entries
    }

    /// Returns the active sync mode.
    #[must_use]
    pub const fn mode(&self) -> SyncMode {
        self.mode
    }

    /// Returns the number of reviews per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the current page number, clamped to the list.
    #[must_use]
    pub fn current_page(&self) -> usize {
        clamp_page(self.current_page, self.entries.len(), self.page_size)
    }

    /// Returns the current page of reviews.
    #[must_use]
    pub fn page(&self) -> ReviewPage<'_> {
        paginate(&self.entries, self.current_page, self.page_size)
    }

    /// Returns an arbitrary page without moving the current page.
    #[must_use]
    pub fn paginate(&self, page: usize, page_size: usize) -> ReviewPage<'_> {
        paginate(&self.entries, page, page_size)
    }

    /// Moves to `page`, clamped into range.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = clamp_page(page, self.entries.len(), self.page_size);
    }

    /// Advances one page if possible.
    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page().saturating_add(1));
    }

    /// Goes back one page if possible.
    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page().saturating_sub(1));
    }

    /// Loads the list from the remote store and resets to page one.
    ///
    /// In authoritative mode the list becomes exactly the fetched rows (empty
    /// when the fetch fails). In blended mode the rows merge with the local
    /// cache, or the seed when no cache entry exists, and the result is
    /// written back to the cache.
    pub async fn load_initial(&mut self) {
        let started = Instant::now();
        let fetched = fetch_or_empty(self.store.as_ref()).await;
        let latency = started.elapsed();

        self.entries = match self.mode {
            SyncMode::Authoritative => {
                let mut reviews = fetched;
                sort_newest_first(&mut reviews);
                reviews
            }
            SyncMode::Blended => blend(fetched, self.local_snapshot()),
        };
        self.current_page = 1;
        self.persist();

        tracing::debug!(
            review_count = self.entries.len(),
            ?latency,
            "review feed loaded"
        );
        self.telemetry.record(TelemetryEvent::FeedLoaded {
            review_count: self.entries.len(),
            latency_ms: u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
            blended: self.mode == SyncMode::Blended,
        });
    }

    /// Submits the review held in `form`.
    ///
    /// When the form fails its preconditions this is a no-op and returns
    /// `None`. Otherwise the review is inserted immediately, the page resets
    /// to one, the form is cleared, the review is dispatched to the store
    /// without waiting, and a re-fetch is scheduled after the refetch delay.
    /// The returned handle resolves that re-fetch; see [`Self::settle`].
    ///
    /// Dispatch and re-fetch need a Tokio runtime. Outside one, only the
    /// local insert happens.
    pub fn submit(&mut self, form: &mut ReviewForm) -> Option<PendingRefresh> {
        let now = (self.clock)();
        let review = form.to_review(&now)?;
        let review_id = review.id.clone();

        self.entries.push(review.clone());
        sort_newest_first(&mut self.entries);
        self.current_page = 1;
        form.clear();
        self.persist();
        self.telemetry.record(TelemetryEvent::ReviewSubmitted {
            review_id: review_id.clone(),
        });

        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(%review_id, "no async runtime; review kept locally only");
            return Some(PendingRefresh {
                review_id,
                task: None,
            });
        };

        let dispatch_store = Arc::clone(&self.store);
        runtime.spawn(async move {
            if let Err(error) = dispatch_store.submit_review(&review).await {
                tracing::warn!(review_id = %review.id, "review submission failed: {error}");
            }
        });

        let refetch_store = Arc::clone(&self.store);
        let delay = self.refetch_delay;
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            fetch_or_empty(refetch_store.as_ref()).await
        });

        Some(PendingRefresh {
            review_id,
            task: Some(task),
        })
    }

    /// Waits for a scheduled re-fetch and reconciles the list with it.
    ///
    /// A non-empty snapshot replaces the list (or, in blended mode, merges
    /// into it); an empty or failed one keeps the optimistic entry visible.
    /// Returns true when the remote snapshot was applied.
    pub async fn settle(&mut self, pending: PendingRefresh) -> bool {
        let remote = match pending.task {
            Some(task) => task.await.unwrap_or_else(|error| {
                tracing::warn!("review re-fetch task failed: {error}");
                Vec::new()
            }),
            None => Vec::new(),
        };

        let local = std::mem::take(&mut self.entries);
        let replaced = !remote.is_empty();
        self.entries = match self.mode {
            SyncMode::Authoritative => reconcile(remote, local).reviews,
            SyncMode::Blended => blend(remote, local),
        };
        self.persist();

        tracing::debug!(
            review_id = %pending.review_id,
            replaced,
            "review feed reconciled after submission"
        );
        self.telemetry.record(TelemetryEvent::FeedReconciled {
            review_count: self.entries.len(),
            replaced,
        });
        replaced
    }

    fn local_snapshot(&self) -> Vec<Review> {
        let cached = self.cache.as_ref().and_then(|cache| match cache.load() {
            Ok(reviews) => reviews,
            Err(error) => {
                tracing::warn!("ignoring unreadable review cache: {error}");
                None
            }
        });
        cached.unwrap_or_else(seed_reviews)
    }

    fn persist(&self) {
        if self.mode != SyncMode::Blended {
            return;
        }
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        if let Err(error) = cache.store(&self.entries) {
            tracing::warn!("failed to update review cache: {error}");
        }
    }
}

async fn fetch_or_empty<S: ReviewStore + ?Sized>(store: &S) -> Vec<Review> {
    match store.fetch_reviews().await {
        Ok(reviews) => reviews,
        Err(error) => {
            tracing::warn!("review fetch failed; showing no remote data: {error}");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "synchronizer_tests.rs"]
mod tests;
