//! Configuration types for payroll processing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files or edited at runtime.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::SalaryRecord;

/// The rate configuration applied when salary components are derived.
///
/// Percentages are whole numbers, so `hra_percent = 20` means 20% of basic.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig::default();
/// assert_eq!(config.hra_percent, Decimal::from(40));
/// assert!(config.pf_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Percentage of basic salary paid as house rent allowance.
    #[serde(alias = "hraPercent")]
    pub hra_percent: Decimal,
    /// Flat monthly medical allowance.
    #[serde(alias = "medicalFixed")]
    pub medical_fixed: Decimal,
    /// Percentage withheld as income tax from basic plus allowances.
    #[serde(alias = "tdsRate")]
    pub tds_rate: Decimal,
    /// Flat monthly professional tax per employee.
    #[serde(alias = "profTax")]
    pub prof_tax: Decimal,
    /// Whether the provident fund deduction applies.
    #[serde(alias = "pfEnabled")]
    pub pf_enabled: bool,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            hra_percent: Decimal::from(40),
            medical_fixed: Decimal::from(1250),
            tds_rate: Decimal::from(10),
            prof_tax: Decimal::from(200),
            pf_enabled: true,
        }
    }
}

impl PayrollConfig {
    /// Checks every rate field against the configuration invariants.
    ///
    /// Returns the first violation found as [`PayrollError::InvalidConfig`].
    pub fn validate(&self) -> PayrollResult<()> {
        for key in ConfigKey::ALL {
            if let ConfigValue::Amount(amount) = self.get(key) {
                key.check_amount(amount)?;
            }
        }
        Ok(())
    }

    /// Reads a single field by key.
    pub fn get(&self, key: ConfigKey) -> ConfigValue {
        match key {
            ConfigKey::HraPercent => ConfigValue::Amount(self.hra_percent),
            ConfigKey::MedicalFixed => ConfigValue::Amount(self.medical_fixed),
            ConfigKey::TdsRate => ConfigValue::Amount(self.tds_rate),
            ConfigKey::ProfTax => ConfigValue::Amount(self.prof_tax),
            ConfigKey::PfEnabled => ConfigValue::Flag(self.pf_enabled),
        }
    }
}

/// Names one editable field of [`PayrollConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKey {
    /// House rent allowance percentage.
    #[serde(alias = "hraPercent")]
    HraPercent,
    /// Fixed medical allowance.
    #[serde(alias = "medicalFixed")]
    MedicalFixed,
    /// Income tax withholding percentage.
    #[serde(alias = "tdsRate")]
    TdsRate,
    /// Flat professional tax.
    #[serde(alias = "profTax")]
    ProfTax,
    /// Provident fund on/off flag.
    #[serde(alias = "pfEnabled")]
    PfEnabled,
}

impl ConfigKey {
    /// Every key, in declaration order.
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::HraPercent,
        ConfigKey::MedicalFixed,
        ConfigKey::TdsRate,
        ConfigKey::ProfTax,
        ConfigKey::PfEnabled,
    ];

    /// The snake_case field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::HraPercent => "hra_percent",
            ConfigKey::MedicalFixed => "medical_fixed",
            ConfigKey::TdsRate => "tds_rate",
            ConfigKey::ProfTax => "prof_tax",
            ConfigKey::PfEnabled => "pf_enabled",
        }
    }

    fn is_percentage(&self) -> bool {
        matches!(self, ConfigKey::HraPercent | ConfigKey::TdsRate)
    }

    pub(crate) fn check_amount(&self, amount: Decimal) -> PayrollResult<()> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(self.invalid("must not be negative"));
        }
        if self.is_percentage() && !amount.fract().is_zero() {
            return Err(self.invalid("must be a whole-number percentage"));
        }
        Ok(())
    }

    pub(crate) fn invalid(&self, message: &str) -> PayrollError {
        PayrollError::InvalidConfig {
            field: self.as_str().to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hra_percent" | "hraPercent" => Ok(ConfigKey::HraPercent),
            "medical_fixed" | "medicalFixed" => Ok(ConfigKey::MedicalFixed),
            "tds_rate" | "tdsRate" => Ok(ConfigKey::TdsRate),
            "prof_tax" | "profTax" => Ok(ConfigKey::ProfTax),
            "pf_enabled" | "pfEnabled" => Ok(ConfigKey::PfEnabled),
            other => Err(PayrollError::InvalidConfig {
                field: other.to_string(),
                message: "unknown configuration field".to_string(),
            }),
        }
    }
}

/// A new value for one configuration field.
///
/// Deserializes from a JSON/YAML boolean or a number/decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A boolean flag value.
    Flag(bool),
    /// A monetary amount or percentage.
    Amount(Decimal),
}

/// Cadence of the simulated disbursement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Progress units added per tick.
    #[serde(default = "default_progress_step")]
    pub progress_step: u8,
    /// Delay between ticks, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_progress_step() -> u8 {
    10
}

fn default_tick_interval_ms() -> u64 {
    150
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            progress_step: default_progress_step(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl BatchSettings {
    /// The tick interval as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Number of ticks a full run takes.
    pub fn ticks_per_run(&self) -> u32 {
        100_u32.div_ceil(u32::from(self.progress_step.max(1)))
    }

    /// Checks the step and interval bounds.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.progress_step == 0 || self.progress_step > 100 {
            return Err(PayrollError::InvalidConfig {
                field: "progress_step".to_string(),
                message: "must be between 1 and 100".to_string(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(PayrollError::InvalidConfig {
                field: "tick_interval_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Structure of `payroll.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollFile {
    /// Rate configuration.
    #[serde(default)]
    pub rates: PayrollConfig,
    /// Batch cadence.
    #[serde(default)]
    pub batch: BatchSettings,
}

/// Structure of `records.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsFile {
    /// Seed salary records, in display order.
    #[serde(default)]
    pub records: Vec<SalaryRecord>,
}
