//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll rates,
//! batch cadence and seed salary records from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{PayrollError, PayrollResult};
use crate::models::SalaryRecord;
use crate::records::ensure_unique_ids;

use super::types::{BatchSettings, PayrollConfig, PayrollFile, RecordsFile};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── payroll.yaml   # rates and batch cadence
/// └── records.yaml   # seed salary records
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("TDS rate: {}%", loader.rates().tds_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rates: PayrollConfig,
    batch: BatchSettings,
    records: Vec<SalaryRecord>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Either file is missing
    /// - Either file contains invalid YAML
    /// - A rate or batch setting violates its bounds
    /// - A seed record repeats an id or has a negative basic salary
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let payroll = Self::load_yaml::<PayrollFile>(&path.join("payroll.yaml"))?;
        let records = Self::load_yaml::<RecordsFile>(&path.join("records.yaml"))?;

        let loader = Self::from_parts(payroll.rates, payroll.batch, records.records)?;
        info!(
            path = %path.display(),
            records = loader.records.len(),
            "Loaded payroll configuration"
        );
        Ok(loader)
    }

    /// Builds a loader from already-parsed parts, validating them.
    pub fn from_parts(
        rates: PayrollConfig,
        batch: BatchSettings,
        records: Vec<SalaryRecord>,
    ) -> PayrollResult<Self> {
        rates.validate()?;
        batch.validate()?;
        ensure_unique_ids(&records)?;
        for record in &records {
            if record.basic_salary.is_sign_negative() && !record.basic_salary.is_zero() {
                return Err(PayrollError::InvalidRecord {
                    id: record.id.clone(),
                    message: "basic salary must not be negative".to_string(),
                });
            }
        }
        Ok(Self {
            rates,
            batch,
            records,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the rate configuration.
    pub fn rates(&self) -> &PayrollConfig {
        &self.rates
    }

    /// Returns the batch cadence.
    pub fn batch(&self) -> &BatchSettings {
        &self.batch
    }

    /// Returns the seed records in file order.
    pub fn records(&self) -> &[SalaryRecord] {
        &self.records
    }
}
