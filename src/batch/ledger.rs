//! The mutable payroll aggregate driven by batch ticks.
//!
//! [`PayrollLedger`] owns the config store, the record set and the batch run
//! together, so each tick handler applies all of its changes in one
//! synchronous step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{BatchSettings, ConfigKey, ConfigLoader, ConfigValue, PayrollConfig, PayrollConfigStore};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayrollSummary, SalaryRecord};
use crate::records::PayrollRecordSet;
use crate::report::summarize;

use super::state::{BatchProgress, BatchRun, TickResult};

/// The result of a completed batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Identifier of the run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run completed.
    pub completed_at: DateTime<Utc>,
    /// Employee ids processed by the run, in record order.
    pub processed_ids: Vec<String>,
    /// The rates the records were computed with.
    pub config: PayrollConfig,
}

/// What one tick of the ledger did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Progress advanced; the run continues.
    Progressed(BatchProgress),
    /// Progress reached 100 and pending records were processed.
    Completed {
        /// Final progress snapshot.
        progress: BatchProgress,
        /// What the run processed.
        outcome: BatchOutcome,
    },
    /// The run this tick belonged to is no longer active.
    Stale,
}

/// Config store, record set and batch run for one payroll session.
#[derive(Debug, Clone)]
pub struct PayrollLedger {
    config: PayrollConfigStore,
    records: PayrollRecordSet,
    run: BatchRun,
    last_outcome: Option<BatchOutcome>,
}

impl PayrollLedger {
    /// Creates a ledger with an idle batch run.
    pub fn new(config: PayrollConfigStore, records: PayrollRecordSet, settings: &BatchSettings) -> Self {
        Self {
            config,
            records,
            run: BatchRun::new(settings.progress_step),
            last_outcome: None,
        }
    }

    /// Creates a ledger from loaded configuration and seed records.
    pub fn from_loader(loader: &ConfigLoader) -> PayrollResult<Self> {
        let config = PayrollConfigStore::new(loader.rates().clone())?;
        let records = PayrollRecordSet::new(loader.records().to_vec())?;
        Ok(Self::new(config, records, loader.batch()))
    }

    /// The current rate configuration.
    pub fn config(&self) -> &PayrollConfig {
        self.config.current()
    }

    /// The record set.
    pub fn records(&self) -> &PayrollRecordSet {
        &self.records
    }

    /// The current batch progress.
    pub fn progress(&self) -> BatchProgress {
        self.run.snapshot()
    }

    /// The outcome of the most recent completed run.
    pub fn last_outcome(&self) -> Option<&BatchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Summarizes all records under the current configuration.
    pub fn summarize(&self) -> PayrollSummary {
        summarize(self.records.as_slice(), self.config.current())
    }

    /// Replaces one configuration field.
    ///
    /// Takes effect for the next batch completion, including a run already
    /// in progress.
    pub fn update_config(&mut self, key: ConfigKey, value: ConfigValue) -> PayrollResult<()> {
        self.config.update_config(key, value)
    }

    /// Replaces a record by id; see [`PayrollRecordSet::replace`].
    pub fn replace_record(&mut self, id: &str, updated: SalaryRecord) -> bool {
        self.records.replace(id, updated)
    }

    /// Releases a held record back to pending.
    pub fn release_hold(&mut self, id: &str) -> bool {
        self.records.release_hold(id)
    }

    /// Puts a pending record on hold.
    pub fn hold_record(&mut self, id: &str) -> bool {
        self.records.hold(id)
    }

    /// Starts a batch run.
    ///
    /// Rejected while a run is active, or when no record is pending.
    pub fn start_batch(&mut self) -> PayrollResult<Uuid> {
        if self.run.is_running() {
            warn!(run_id = ?self.run.run_id(), "Batch start rejected: already running");
            return Err(PayrollError::BatchAlreadyRunning);
        }
        let pending = self.records.pending_count();
        if pending == 0 {
            warn!("Batch start rejected: no pending records");
            return Err(PayrollError::NoPendingRecords);
        }

        let run_id = self.run.begin()?;
        info!(
            run_id = %run_id,
            pending,
            pending_basic = %self.records.pending_basic_total(),
            "Payroll batch run started"
        );
        Ok(run_id)
    }

    /// Applies one tick for `run_id`.
    ///
    /// On the tick that reaches 100, every pending record is recomputed with
    /// the configuration current at that moment and marked processed.
    pub fn tick(&mut self, run_id: Uuid) -> TickOutcome {
        match self.run.advance(run_id) {
            TickResult::Stale => {
                debug!(run_id = %run_id, "Ignoring tick for inactive run");
                TickOutcome::Stale
            }
            TickResult::Advanced(progress) => {
                debug!(run_id = %run_id, progress, "Payroll batch progress");
                TickOutcome::Progressed(self.run.snapshot())
            }
            TickResult::Finished => {
                let config = self.config.snapshot();
                let processed_ids = self.records.recompute_pending(&config);
                let completed_at = Utc::now();
                let outcome = BatchOutcome {
                    run_id,
                    started_at: self.run.started_at().unwrap_or(completed_at),
                    completed_at,
                    processed_ids,
                    config,
                };
                info!(
                    run_id = %run_id,
                    processed = outcome.processed_ids.len(),
                    "Payroll batch run completed"
                );
                self.last_outcome = Some(outcome.clone());
                TickOutcome::Completed {
                    progress: self.run.snapshot(),
                    outcome,
                }
            }
        }
    }

    /// Cancels the active run without touching any record.
    ///
    /// Returns false if no run was active.
    pub fn cancel_batch(&mut self) -> bool {
        let run_id = self.run.run_id();
        let progress = self.run.progress();
        let cancelled = self.run.cancel();
        if cancelled {
            info!(run_id = ?run_id, progress, "Payroll batch run cancelled");
        }
        cancelled
    }
}
