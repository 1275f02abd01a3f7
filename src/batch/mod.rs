//! Batch disbursement runs for the payroll engine.
//!
//! A run advances a progress counter in fixed steps on a fixed tick
//! interval. When progress reaches 100, every pending record is recomputed
//! with the configuration current at that moment and marked processed.
//! Cancelling before then leaves every record as it was.

mod ledger;
mod observer;
mod runner;
mod state;

pub use ledger::{BatchOutcome, PayrollLedger, TickOutcome};
pub use observer::{ProgressObserver, TracingObserver};
pub use runner::{BatchHandle, BatchRunner, SharedLedger};
pub use state::{BatchPhase, BatchProgress, BatchRun, TickResult};
