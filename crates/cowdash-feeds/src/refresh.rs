//! Refresh task: re-runs the fetch-parse cycle on a timer.
//!
//! [`RefreshTask::spawn`] moves the loop onto the tokio runtime and returns a
//! [`RefreshHandle`] plus the receiving end of the snapshot channel.
//!
//! # Scheduling
//!
//! - The first cycle runs immediately.
//! - Cycles run one at a time inside the task. A fetch slower than the
//!   interval delays the next cycle; missed ticks are skipped, not queued.
//! - [`RefreshHandle::refresh_now`] starts a cycle early. Requests made while
//!   a fetch is in flight collapse into a single follow-up cycle.
//! - Cancelling (or dropping) the handle stops the loop, abandoning any fetch
//!   in flight, and closes the channel.

use crate::{load_snapshot, TicketSource};
use cowdash_core::normalizer::Normalizer;
use cowdash_core::Snapshot;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Shortest accepted refresh interval.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Snapshots buffered between the task and a slow consumer.
const CHANNEL_CAPACITY: usize = 4;

pub struct RefreshTask<S> {
    source: S,
    normalizer: Normalizer,
    interval: Duration,
}

impl<S: TicketSource> RefreshTask<S> {
    /// `interval` is raised to [`MIN_INTERVAL`] when shorter.
    pub fn new(source: S, normalizer: Normalizer, interval: Duration) -> Self {
        Self {
            source,
            normalizer,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start the loop on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, like [`tokio::spawn`].
    pub fn spawn(self) -> (RefreshHandle, mpsc::Receiver<Snapshot>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();
        let wake = Arc::new(Notify::new());

        let join = tokio::spawn(self.run(tx, cancel.clone(), Arc::clone(&wake)));

        let handle = RefreshHandle {
            cancel,
            wake,
            join: Some(join),
        };
        (handle, rx)
    }

    async fn run(self, tx: mpsc::Sender<Snapshot>, cancel: CancellationToken, wake: Arc<Notify>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::debug!(
            source = %self.source.describe(),
            interval_secs = self.interval.as_secs(),
            "refresh task started"
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = wake.notified() => {
                    tracing::debug!("manual refresh");
                    ticker.reset();
                }
                _ = ticker.tick() => {}
            }

            let snapshot = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                snapshot = load_snapshot(&self.source, &self.normalizer) => snapshot,
            };

            if tx.send(snapshot).await.is_err() {
                tracing::debug!("snapshot receiver dropped");
                break;
            }
        }

        tracing::debug!("refresh task stopped");
    }
}

/// Owner of a running [`RefreshTask`].
///
/// Dropping the handle cancels the task.
pub struct RefreshHandle {
    cancel: CancellationToken,
    wake: Arc<Notify>,
    join: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Run a cycle as soon as the current one (if any) finishes.
    pub fn refresh_now(&self) {
        self.wake.notify_one();
    }

    /// Stop the loop. The snapshot channel closes once the task exits.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel and wait for the task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(join) = self.join.take() {
            if let Err(e) = join.await {
                tracing::warn!(error = %e, "refresh task ended abnormally");
            }
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
