//! Runtime holder for the current payroll rates.

use tracing::{info, warn};

use crate::error::PayrollResult;

use super::types::{ConfigKey, ConfigValue, PayrollConfig};

/// Single source of truth for the rates used by the next batch run.
///
/// Updates apply in place and never touch existing salary records; they are
/// picked up when a batch run completes.
///
/// # Example
///
/// ```
/// use payroll_engine::config::{ConfigKey, ConfigValue, PayrollConfigStore};
/// use rust_decimal::Decimal;
///
/// let mut store = PayrollConfigStore::default();
/// store.update_config(ConfigKey::TdsRate, ConfigValue::Amount(Decimal::from(5)))?;
/// assert_eq!(store.current().tds_rate, Decimal::from(5));
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayrollConfigStore {
    config: PayrollConfig,
}

impl PayrollConfigStore {
    /// Wraps an existing configuration after validating it.
    pub fn new(config: PayrollConfig) -> PayrollResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Borrows the current configuration.
    pub fn current(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns an owned copy of the current configuration.
    pub fn snapshot(&self) -> PayrollConfig {
        self.config.clone()
    }

    /// Replaces one field of the configuration.
    ///
    /// Rejects negative amounts, fractional percentages and values whose
    /// kind does not match the key. A rejected update changes nothing.
    pub fn update_config(&mut self, key: ConfigKey, value: ConfigValue) -> PayrollResult<()> {
        let result = self.apply(key, value);
        match &result {
            Ok(()) => info!(field = %key, value = ?value, "Payroll configuration updated"),
            Err(err) => warn!(field = %key, error = %err, "Rejected configuration update"),
        }
        result
    }

    fn apply(&mut self, key: ConfigKey, value: ConfigValue) -> PayrollResult<()> {
        match (key, value) {
            (ConfigKey::PfEnabled, ConfigValue::Flag(enabled)) => {
                self.config.pf_enabled = enabled;
            }
            (_, ConfigValue::Flag(_)) => {
                return Err(key.invalid("expected a number"));
            }
            (_, ConfigValue::Amount(amount)) => {
                let field = match key {
                    ConfigKey::HraPercent => &mut self.config.hra_percent,
                    ConfigKey::MedicalFixed => &mut self.config.medical_fixed,
                    ConfigKey::TdsRate => &mut self.config.tds_rate,
                    ConfigKey::ProfTax => &mut self.config.prof_tax,
                    ConfigKey::PfEnabled => return Err(key.invalid("expected a boolean")),
                };
                key.check_amount(amount)?;
                *field = amount;
            }
        }
        Ok(())
    }
}
