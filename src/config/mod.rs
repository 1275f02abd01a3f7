//! Configuration loading and management for the payroll engine.
//!
//! This module provides the rate configuration, its runtime store, batch
//! cadence settings, and loading of all of these plus seed records from YAML.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded {} salary records", loader.records().len());
//! ```

mod loader;
mod store;
mod types;

pub use loader::ConfigLoader;
pub use store::PayrollConfigStore;
pub use types::{BatchSettings, ConfigKey, ConfigValue, PayrollConfig, PayrollFile, RecordsFile};
