//! # Aggregation Orchestrator
//!
//! Concurrent fan-out over the three backend sources.
//!
//! This module provides the [`AggregationOrchestrator`], which issues the
//! details, inventory and recommendations calls in parallel on the shared
//! worker pool, bounds the wait, and assembles whatever resolved into a
//! [`CompositeView`]. Failure of any subset of sources degrades the view;
//! it never fails the request.
//!
//! Timing model: each source call races a per-source deadline inside its
//! pool job, and the orchestrator performs one overall bounded wait of
//! per-source timeout plus a jitter buffer. After that wait it peeks each
//! outcome slot without blocking; a slot still unresolved at that moment is
//! recorded as timed out even though the underlying call may continue in
//! the background.

use crate::config::AggregationConfig;
use crate::domain::composite_view::CompositeView;
use crate::domain::ids::{ProductId, UserId};
use crate::domain::source_result::{
    STATUS_REJECTED, STATUS_TIMEOUT, STATUS_UNRESOLVED, Source, SourceResult,
};
use crate::infrastructure::pool::{PoolError, SourcePool};
use crate::infrastructure::sources::error::SourceCallResult;
use crate::infrastructure::sources::traits::{
    InventorySource, ProductDetailsSource, RecommendationsSource,
};
use std::future::Future;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::Instrument;
use uuid::Uuid;

/// Error type for aggregation operations.
///
/// Under normal operation `aggregate` is infallible: every per-source
/// failure mode is encoded in the returned view's status. The only escape
/// is the catastrophic case below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// The shared worker pool has been closed and cannot accept any work.
    #[error("aggregation worker pool closed")]
    PoolClosed,
}

/// Result type for aggregation operations.
pub type AggregationResult<T> = Result<T, AggregationError>;

/// Orchestrates concurrent collection of the three source payloads.
#[derive(Debug)]
pub struct AggregationOrchestrator {
    details: Arc<dyn ProductDetailsSource>,
    inventory: Arc<dyn InventorySource>,
    recommendations: Arc<dyn RecommendationsSource>,
    pool: Arc<SourcePool>,
    config: AggregationConfig,
}

impl AggregationOrchestrator {
    /// Creates a new orchestrator on the given pool.
    #[must_use]
    pub fn new(
        details: Arc<dyn ProductDetailsSource>,
        inventory: Arc<dyn InventorySource>,
        recommendations: Arc<dyn RecommendationsSource>,
        pool: Arc<SourcePool>,
        config: AggregationConfig,
    ) -> Self {
        Self {
            details,
            inventory,
            recommendations,
            pool,
            config,
        }
    }

    /// Creates an orchestrator with default configuration and its own pool.
    ///
    /// Must be called inside a tokio runtime; the pool spawns its workers
    /// at construction.
    #[must_use]
    pub fn with_defaults(
        details: Arc<dyn ProductDetailsSource>,
        inventory: Arc<dyn InventorySource>,
        recommendations: Arc<dyn RecommendationsSource>,
    ) -> Self {
        let config = AggregationConfig::default();
        let pool = SourcePool::new(&config.pool);
        Self::new(details, inventory, recommendations, pool, config)
    }

    /// Builds the composite view for one (product, user) pair.
    ///
    /// Issues all three source calls concurrently, waits no longer than the
    /// overall budget, and returns a structurally complete view whose
    /// status records how each source resolved. Degraded availability is a
    /// valid, non-exceptional result: an all-failed view is still `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::PoolClosed`] only if the shared pool has
    /// been shut down.
    pub async fn aggregate(
        &self,
        product_id: &ProductId,
        user_id: &UserId,
    ) -> AggregationResult<CompositeView> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "aggregate",
            request_id = %request_id,
            product_id = %product_id,
            user_id = %user_id,
        );

        async move {
            let details_src = Arc::clone(&self.details);
            let details_pid = product_id.clone();
            let (details_slot, details_done) = self.dispatch(Source::Details, async move {
                details_src.get_product_details(&details_pid).await
            })?;

            let inventory_src = Arc::clone(&self.inventory);
            let inventory_pid = product_id.clone();
            let (inventory_slot, inventory_done) = self.dispatch(Source::Inventory, async move {
                inventory_src.get_inventory(&inventory_pid).await
            })?;

            let recommendations_src = Arc::clone(&self.recommendations);
            let recommendations_pid = product_id.clone();
            let recommendations_uid = user_id.clone();
            let (recommendations_slot, recommendations_done) =
                self.dispatch(Source::Recommendations, async move {
                    recommendations_src
                        .get_recommendations(&recommendations_pid, &recommendations_uid)
                        .await
                })?;

            // Single bounded wait for all three to resolve. Each receiver
            // resolves (or errors, on sender drop) once its slot is written,
            // so a slow source never delays observing a fast one beyond
            // this one budget.
            let all_resolved = async {
                let _ = details_done.await;
                let _ = inventory_done.await;
                let _ = recommendations_done.await;
            };
            if timeout(self.config.overall_wait(), all_resolved)
                .await
                .is_err()
            {
                tracing::warn!(
                    budget_ms = self.config.overall_wait_ms(),
                    "overall wait expired before all sources resolved"
                );
            }

            let view = CompositeView::from_outcomes(
                Self::read_back(&details_slot),
                Self::read_back(&inventory_slot),
                Self::read_back(&recommendations_slot),
            );
            tracing::debug!(status = %view.status(), "aggregation complete");
            Ok(view)
        }
        .instrument(span)
        .await
    }

    /// Closes the shared pool. Subsequent `aggregate` calls fail with
    /// [`AggregationError::PoolClosed`].
    pub fn close(&self) {
        self.pool.close();
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Submits one wrapped source call to the pool.
    ///
    /// The job writes its outcome into a write-once slot and signals the
    /// returned receiver. A saturated pool resolves the slot immediately
    /// with a rejected outcome; only a closed pool is fatal.
    fn dispatch<T, F>(
        &self,
        source: Source,
        call: F,
    ) -> AggregationResult<(Arc<OnceLock<SourceResult<T>>>, oneshot::Receiver<()>)>
    where
        T: Send + Sync + 'static,
        F: Future<Output = SourceCallResult<T>> + Send + 'static,
    {
        let slot = Arc::new(OnceLock::new());
        let (done_tx, done_rx) = oneshot::channel();
        let per_source = self.config.per_source_timeout();
        let job_slot = Arc::clone(&slot);

        let submitted = self.pool.try_execute(async move {
            let outcome = match timeout(per_source, call).await {
                Ok(Ok(value)) => SourceResult::ok(value),
                Ok(Err(e)) => {
                    tracing::warn!(source = %source, error = %e, "source call failed");
                    SourceResult::failed(e.to_string())
                }
                Err(_) => {
                    tracing::warn!(
                        source = %source,
                        timeout_ms = per_source.as_millis() as u64,
                        "source call timed out"
                    );
                    SourceResult::failed(STATUS_TIMEOUT)
                }
            };
            let _ = job_slot.set(outcome);
            let _ = done_tx.send(());
        });

        match submitted {
            Ok(()) => {}
            Err(PoolError::Saturated) => {
                // Fail fast rather than block the submitter; the dropped
                // job also drops its sender, so the overall wait is not
                // held up by this source.
                tracing::warn!(source = %source, "worker pool saturated, submission rejected");
                let _ = slot.set(SourceResult::failed(STATUS_REJECTED));
            }
            Err(PoolError::Closed) => return Err(AggregationError::PoolClosed),
        }

        Ok((slot, done_rx))
    }

    /// Non-blocking read of an outcome slot after the overall wait.
    ///
    /// A slot still unresolved here is recorded as timed out; the in-flight
    /// call may continue in the background without affecting this result.
    fn read_back<T: Clone>(slot: &OnceLock<SourceResult<T>>) -> SourceResult<T> {
        match slot.get() {
            Some(outcome) => outcome.clone(),
            None => SourceResult::failed(STATUS_UNRESOLVED),
        }
    }
}
