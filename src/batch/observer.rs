//! Progress observation for batch runs.

use tracing::{debug, info};

use super::ledger::BatchOutcome;
use super::state::BatchProgress;

/// Receives batch progress, once per tick.
///
/// Any `Fn(BatchProgress) + Send + Sync` closure is an observer.
pub trait ProgressObserver: Send + Sync {
    /// Called after every tick that advanced the run, including the final one.
    fn on_progress(&self, progress: BatchProgress);

    /// Called once when a run completes.
    fn on_complete(&self, _outcome: &BatchOutcome) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(BatchProgress) + Send + Sync,
{
    fn on_progress(&self, progress: BatchProgress) {
        self(progress)
    }
}

/// Observer that reports progress through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn on_progress(&self, progress: BatchProgress) {
        debug!(
            run_id = ?progress.run_id,
            progress = progress.progress,
            phase = %progress.phase,
            "Batch progress"
        );
    }

    fn on_complete(&self, outcome: &BatchOutcome) {
        info!(
            run_id = %outcome.run_id,
            processed = outcome.processed_ids.len(),
            elapsed_ms = (outcome.completed_at - outcome.started_at).num_milliseconds(),
            "Batch disbursement finished"
        );
    }
}
