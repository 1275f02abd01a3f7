//! Timed driver for batch runs.
//!
//! [`BatchRunner`] spawns one tokio task per run. The task ticks at a fixed
//! interval, locking the shared ledger for each tick and yielding between
//! ticks. Cancellation is observed at the next tick boundary, where the task
//! finds its run id inactive and exits.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::BatchSettings;
use crate::error::PayrollResult;

use super::ledger::{BatchOutcome, PayrollLedger, TickOutcome};
use super::observer::{ProgressObserver, TracingObserver};
use super::state::BatchProgress;

/// A ledger shared between the runner task and its callers.
pub type SharedLedger = Arc<Mutex<PayrollLedger>>;

/// Handle to a spawned batch run.
#[derive(Debug)]
pub struct BatchHandle {
    run_id: Uuid,
    task: JoinHandle<Option<BatchOutcome>>,
}

impl BatchHandle {
    /// Identifier of the spawned run.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Waits for the run to end.
    ///
    /// Resolves to the outcome on completion, or `None` if the run was
    /// cancelled or its ticker task was aborted. A panic in the ticker task
    /// is resumed on the caller.
    pub async fn wait(self) -> Option<BatchOutcome> {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => {
                warn!(run_id = %self.run_id, error = %err, "Batch ticker task did not finish");
                None
            }
        }
    }
}

/// Starts, cancels and reports on batch runs over a shared ledger.
#[derive(Clone)]
pub struct BatchRunner {
    ledger: SharedLedger,
    tick_interval: Duration,
    observer: Arc<dyn ProgressObserver>,
}

impl BatchRunner {
    /// Creates a runner ticking at `settings.tick_interval()`.
    pub fn new(ledger: SharedLedger, settings: &BatchSettings) -> Self {
        Self {
            ledger,
            tick_interval: settings.tick_interval(),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replaces the progress observer.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: ProgressObserver + 'static,
    {
        self.observer = Arc::new(observer);
        self
    }

    /// The shared ledger.
    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    /// The current batch progress.
    pub async fn progress(&self) -> BatchProgress {
        self.ledger.lock().await.progress()
    }

    /// Starts a run and spawns its ticker.
    ///
    /// Rejected while another run is active or when nothing is pending; a
    /// rejected call leaves the active run alone.
    pub async fn start(&self) -> PayrollResult<BatchHandle> {
        let run_id = self.ledger.lock().await.start_batch()?;

        let task = tokio::spawn(drive(
            Arc::clone(&self.ledger),
            run_id,
            self.tick_interval,
            Arc::clone(&self.observer),
        ));

        Ok(BatchHandle { run_id, task })
    }

    /// Cancels the active run.
    ///
    /// Returns false if nothing was running.
    pub async fn cancel(&self) -> bool {
        self.ledger.lock().await.cancel_batch()
    }
}

async fn drive(
    ledger: SharedLedger,
    run_id: Uuid,
    tick_interval: Duration,
    observer: Arc<dyn ProgressObserver>,
) -> Option<BatchOutcome> {
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of an interval completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let outcome = ledger.lock().await.tick(run_id);
        match outcome {
            TickOutcome::Progressed(progress) => observer.on_progress(progress),
            TickOutcome::Completed { progress, outcome } => {
                observer.on_progress(progress);
                observer.on_complete(&outcome);
                return Some(outcome);
            }
            TickOutcome::Stale => {
                debug!(run_id = %run_id, "Batch ticker exiting");
                return None;
            }
        }
    }
}
