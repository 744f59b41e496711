//! Shared read-through cache for the model metrics snapshot.
//!
//! SYSTEM CONTEXT
//! ==============
//! Dashboard and Settings both show the metrics snapshot. One `ModelCache`
//! is provided at the app root so a tab switch does not refetch, and so a
//! settings save or retrain can mark the snapshot stale for every view.
//!
//! DESIGN
//! ======
//! - A fetch is identified by a ticket. Only the ticket recorded in
//!   `in_flight` may land; `invalidate` clears it so a response that started
//!   before a mutation can never overwrite state observed after it.
//! - Snapshots are replaced wholesale, never merged field by field.
//! - A failed fetch keeps the previous snapshot and records the error.

use contract::{ApiError, MetricsSnapshot, ModelMetrics, PredictionApi};

use super::handle::StateHandle;

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

/// Cached metrics snapshot plus fetch bookkeeping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelCache {
    snapshot: Option<MetricsSnapshot>,
    stale: bool,
    generation: u64,
    in_flight: Option<u64>,
    last_error: Option<ApiError>,
}

/// What a read-through call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A fresh snapshot was already cached; no request was made.
    Hit,
    /// A request completed and its snapshot was stored.
    Fetched,
    /// Another fetch was already in flight; this call made no request.
    Joined,
    /// The request failed; the previous snapshot (if any) was kept.
    Failed,
    /// The response arrived after an invalidation or unmount and was dropped.
    Discarded,
}

impl ModelCache {
    #[must_use]
    pub fn snapshot(&self) -> Option<&MetricsSnapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn metrics(&self) -> Option<&ModelMetrics> {
        self.snapshot.as_ref().map(|s| &s.metrics)
    }

    /// Cached and not invalidated since it was fetched.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.snapshot.is_some() && !self.stale
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// Claim the fetch slot. `None` when a fetch is already in flight.
    pub fn begin_fetch(&mut self) -> Option<u64> {
        if self.in_flight.is_some() {
            return None;
        }
        self.generation += 1;
        self.in_flight = Some(self.generation);
        Some(self.generation)
    }

    /// Land a fetch result. Returns `false` when the ticket is no longer current.
    pub fn finish_fetch(&mut self, ticket: u64, outcome: Result<MetricsSnapshot, ApiError>) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        match outcome {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.stale = false;
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
        true
    }

    /// Mark the snapshot stale and orphan any fetch in flight.
    pub fn invalidate(&mut self) {
        self.stale = true;
        self.in_flight = None;
    }

    /// Install metrics returned by a retrain, then invalidate.
    ///
    /// The metrics entity is swapped as a whole; importance and
    /// hyperparameters stay until the follow-up fetch replaces the snapshot.
    /// With nothing cached yet, only the follow-up fetch may create one.
    pub fn apply_retrain(&mut self, metrics: ModelMetrics) {
        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.metrics = metrics;
        }
        self.invalidate();
    }
}

/// Serve the cached snapshot when fresh, otherwise fetch it.
pub async fn load_snapshot<A, H>(api: &A, cache: &H) -> ReadOutcome
where
    A: PredictionApi + ?Sized,
    H: StateHandle<ModelCache>,
{
    if cache.peek(ModelCache::is_fresh).unwrap_or(false) {
        return ReadOutcome::Hit;
    }
    let ticket = match cache.update_with(ModelCache::begin_fetch) {
        Some(Some(ticket)) => ticket,
        Some(None) => return ReadOutcome::Joined,
        None => return ReadOutcome::Discarded,
    };

    let outcome = api.get_metrics().await;
    if let Err(err) = &outcome {
        log::warn!("metrics fetch failed: {err}");
    }
    let failed = outcome.is_err();
    match cache.update_with(|c| c.finish_fetch(ticket, outcome)) {
        Some(true) if failed => ReadOutcome::Failed,
        Some(true) => ReadOutcome::Fetched,
        _ => ReadOutcome::Discarded,
    }
}

/// Drop the cached snapshot's freshness and fetch again.
pub async fn refresh_snapshot<A, H>(api: &A, cache: &H) -> ReadOutcome
where
    A: PredictionApi + ?Sized,
    H: StateHandle<ModelCache>,
{
    cache.update_with(ModelCache::invalidate);
    load_snapshot(api, cache).await
}
