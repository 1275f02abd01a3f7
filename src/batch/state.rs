//! Batch run state machine.
//!
//! ```text
//!   Idle ──start──▶ Running ──progress reaches 100──▶ Completed
//!    ▲                 │                                  │
//!    └─────cancel──────┘                                  │
//!                      ▲──────────────start───────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};

/// The phase a batch run is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPhase {
    /// No run active; initial state and the state after a cancel.
    Idle,
    /// Progress is being advanced tick by tick.
    Running,
    /// The last run reached 100 and its records were processed.
    Completed,
}

impl fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchPhase::Idle => "idle",
            BatchPhase::Running => "running",
            BatchPhase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// A point-in-time view of the batch run for progress indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    /// Current phase.
    pub phase: BatchPhase,
    /// Progress from 0 to 100.
    pub progress: u8,
    /// Identifier of the current or last run.
    pub run_id: Option<Uuid>,
    /// True only while the run is actively advancing.
    pub is_running: bool,
}

/// What a single tick did to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Progress moved forward but has not reached 100.
    Advanced(u8),
    /// Progress reached 100 and the run is now completed.
    Finished,
    /// The tick belongs to a run that was cancelled or superseded.
    Stale,
}

/// Progress counter and phase of the disbursement run.
///
/// Progress is monotonically non-decreasing within a run and resets to 0
/// only when a new run begins or the current one is cancelled.
#[derive(Debug, Clone)]
pub struct BatchRun {
    phase: BatchPhase,
    progress: u8,
    step: u8,
    run_id: Option<Uuid>,
    started_at: Option<DateTime<Utc>>,
}

impl BatchRun {
    /// Creates an idle run that advances by `step` units per tick.
    ///
    /// A step of 0 is treated as 1.
    pub fn new(step: u8) -> Self {
        Self {
            phase: BatchPhase::Idle,
            progress: 0,
            step: step.clamp(1, 100),
            run_id: None,
            started_at: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    /// Current progress, 0 to 100.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Identifier of the current or last run.
    pub fn run_id(&self) -> Option<Uuid> {
        self.run_id
    }

    /// When the current or last run started.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// True while the run is in the `Running` phase.
    pub fn is_running(&self) -> bool {
        self.phase == BatchPhase::Running
    }

    /// Returns a snapshot for observers.
    pub fn snapshot(&self) -> BatchProgress {
        BatchProgress {
            phase: self.phase,
            progress: self.progress,
            run_id: self.run_id,
            is_running: self.is_running(),
        }
    }

    /// Begins a new run from `Idle` or `Completed`.
    ///
    /// Rejected with [`PayrollError::BatchAlreadyRunning`] while running; the
    /// active run's progress is unaffected.
    pub fn begin(&mut self) -> PayrollResult<Uuid> {
        if self.is_running() {
            return Err(PayrollError::BatchAlreadyRunning);
        }
        let run_id = Uuid::new_v4();
        self.phase = BatchPhase::Running;
        self.progress = 0;
        self.run_id = Some(run_id);
        self.started_at = Some(Utc::now());
        Ok(run_id)
    }

    /// Advances progress by one step on behalf of `run_id`.
    pub fn advance(&mut self, run_id: Uuid) -> TickResult {
        if !self.is_running() || self.run_id != Some(run_id) {
            return TickResult::Stale;
        }
        self.progress = self.progress.saturating_add(self.step).min(100);
        if self.progress >= 100 {
            self.phase = BatchPhase::Completed;
            TickResult::Finished
        } else {
            TickResult::Advanced(self.progress)
        }
    }

    /// Abandons a running run, returning to `Idle` with zero progress.
    ///
    /// Returns false if nothing was running.
    pub fn cancel(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = BatchPhase::Idle;
        self.progress = 0;
        self.run_id = None;
        self.started_at = None;
        true
    }
}

impl Default for BatchRun {
    fn default() -> Self {
        Self::new(10)
    }
}
