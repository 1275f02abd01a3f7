//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::batch::{BatchRunner, PayrollLedger, SharedLedger};
use crate::config::{BatchSettings, ConfigLoader};
use crate::error::PayrollResult;

/// Shared application state.
///
/// Holds the batch runner, which in turn owns the shared payroll ledger.
#[derive(Clone)]
pub struct AppState {
    runner: BatchRunner,
}

impl AppState {
    /// Creates application state from loaded configuration.
    pub fn new(loader: &ConfigLoader) -> PayrollResult<Self> {
        let ledger = PayrollLedger::from_loader(loader)?;
        Ok(Self::from_ledger(ledger, loader.batch()))
    }

    /// Creates application state around an existing ledger.
    pub fn from_ledger(ledger: PayrollLedger, settings: &BatchSettings) -> Self {
        let shared: SharedLedger = Arc::new(Mutex::new(ledger));
        Self {
            runner: BatchRunner::new(shared, settings),
        }
    }

    /// Returns the batch runner.
    pub fn runner(&self) -> &BatchRunner {
        &self.runner
    }

    /// Returns the shared ledger.
    pub fn ledger(&self) -> &SharedLedger {
        self.runner.ledger()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // axum state must be Clone
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_from_seed_config() {
        let loader = ConfigLoader::load("./config/default").unwrap();
        assert!(AppState::new(&loader).is_ok());
    }
}
