//! # Bounded Worker Pool
//!
//! Shared bounded pool of worker tasks fed by a buffered channel.
//!
//! All source calls for every aggregation request run on one [`SourcePool`]
//! rather than one task per call, bounding resource usage under load. The
//! pool keeps a floor of resident workers, grows up to a maximum when
//! submissions outpace workers, and retires the extra workers after an idle
//! period.
//!
//! Saturation policy: submission is non-blocking and fails fast. When the
//! queue is full, [`SourcePool::try_submit`] returns
//! [`PoolError::Saturated`] and the caller decides how to record the
//! rejection. A submission is never silently dropped.

use crate::config::PoolConfig;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::timeout;

/// A unit of work accepted by the pool.
pub type Job = BoxFuture<'static, ()>;

/// Error type for pool submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Queue and workers are all busy; the submission was not accepted.
    #[error("worker pool saturated")]
    Saturated,

    /// The pool has been closed and accepts no further work.
    ///
    /// This is the catastrophic scheduling failure: it never occurs under
    /// normal operation and is kept distinct from per-source failures.
    #[error("worker pool closed")]
    Closed,
}

/// Shared bounded pool of worker tasks.
///
/// Must be created inside a tokio runtime; workers are spawned at
/// construction.
#[derive(Debug)]
pub struct SourcePool {
    sender: parking_lot::Mutex<Option<mpsc::Sender<Job>>>,
    receiver: Arc<AsyncMutex<mpsc::Receiver<Job>>>,
    workers: AtomicUsize,
    in_flight: AtomicUsize,
    max_size: usize,
    idle_timeout: Duration,
}

impl SourcePool {
    /// Creates a pool and spawns its resident workers.
    #[must_use]
    pub fn new(config: &PoolConfig) -> Arc<Self> {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let max_size = config.max_size.max(config.core_size).max(1);

        let pool = Arc::new(Self {
            sender: parking_lot::Mutex::new(Some(sender)),
            receiver: Arc::new(AsyncMutex::new(receiver)),
            workers: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_size,
            idle_timeout: Duration::from_millis(config.idle_timeout_ms),
        });

        for _ in 0..config.core_size.max(1) {
            pool.spawn_worker(true);
        }

        pool
    }

    /// Submits a job without blocking.
    ///
    /// # Errors
    ///
    /// - [`PoolError::Saturated`] if the queue is full
    /// - [`PoolError::Closed`] if the pool has been closed
    pub fn try_submit(self: &Arc<Self>, job: Job) -> Result<(), PoolError> {
        let guard = self.sender.lock();
        let sender = guard.as_ref().ok_or(PoolError::Closed)?;

        match sender.try_send(job) {
            Ok(()) => {
                self.in_flight.fetch_add(1, Ordering::SeqCst);
                self.maybe_grow();
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(PoolError::Saturated),
            Err(TrySendError::Closed(_)) => Err(PoolError::Closed),
        }
    }

    /// Submits any `'static` future as a job without blocking.
    ///
    /// # Errors
    ///
    /// Same as [`SourcePool::try_submit`].
    pub fn try_execute<F>(self: &Arc<Self>, future: F) -> Result<(), PoolError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.try_submit(future.boxed())
    }

    /// Closes the pool. Queued jobs still run; new submissions are refused.
    pub fn close(&self) {
        self.sender.lock().take();
    }

    /// Returns the current number of workers.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.load(Ordering::SeqCst)
    }

    /// Returns the number of jobs submitted but not yet finished.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Spawns a transient worker when accepted work outpaces the workers.
    ///
    /// The check is a heuristic over atomic counters: a lost race means a
    /// job waits in the queue until a worker frees up, which is acceptable.
    fn maybe_grow(self: &Arc<Self>) {
        let workers = self.workers.load(Ordering::SeqCst);
        if workers < self.max_size && self.in_flight.load(Ordering::SeqCst) > workers {
            self.spawn_worker(false);
        }
    }

    fn spawn_worker(self: &Arc<Self>, resident: bool) {
        self.workers.fetch_add(1, Ordering::SeqCst);
        let pool = Arc::clone(self);

        tokio::spawn(async move {
            loop {
                let job = if resident {
                    pool.receiver.lock().await.recv().await
                } else {
                    // Transient workers retire after an idle period.
                    match timeout(pool.idle_timeout, async {
                        pool.receiver.lock().await.recv().await
                    })
                    .await
                    {
                        Ok(job) => job,
                        Err(_) => break,
                    }
                };

                match job {
                    Some(job) => {
                        job.await;
                        pool.in_flight.fetch_sub(1, Ordering::SeqCst);
                    }
                    // Channel closed: pool is shutting down.
                    None => break,
                }
            }
            pool.workers.fetch_sub(1, Ordering::SeqCst);
        });
    }
}
