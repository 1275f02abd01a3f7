//! Request types for the payroll API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigKey, ConfigValue};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{RecordStatus, SalaryRecord};

/// Query string for `GET /records`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordQuery {
    /// Only records with this status.
    #[serde(default)]
    pub status: Option<RecordStatus>,
    /// Case-insensitive match on name or id.
    #[serde(default)]
    pub q: Option<String>,
}

/// Body of `PATCH /config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigUpdateRequest {
    /// The field to change.
    pub key: ConfigKey,
    /// Its new value.
    pub value: ConfigValue,
}

/// Body of `PUT /records/{id}`.
///
/// The employee id comes from the path. Basic salary, status and the
/// derived components are owned by the batch lifecycle: they may be echoed
/// back unchanged or omitted, but a different value is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordReplaceRequest {
    /// Employee display name.
    pub name: String,
    /// Job title.
    pub designation: String,
    /// Department name.
    pub department: String,
    /// Fixed base pay.
    #[serde(default)]
    pub basic_salary: Option<Decimal>,
    /// House rent plus fixed allowances.
    #[serde(default)]
    pub allowances: Option<Decimal>,
    /// Income tax withheld.
    #[serde(default)]
    pub tax: Option<Decimal>,
    /// Employee provident fund contribution.
    #[serde(default)]
    pub pf: Option<Decimal>,
    /// Combined deductions.
    #[serde(default)]
    pub deductions: Option<Decimal>,
    /// Take-home pay.
    #[serde(default)]
    pub net_salary: Option<Decimal>,
    /// Lifecycle state.
    #[serde(default)]
    pub status: Option<RecordStatus>,
}

impl RecordReplaceRequest {
    /// Builds the replacement for `current` from this request.
    ///
    /// Fails with [`PayrollError::InvalidRecord`] if the request changes a
    /// field that only a batch run may set.
    pub fn apply_to(self, current: &SalaryRecord) -> PayrollResult<SalaryRecord> {
        let locked = [
            ("basic_salary", self.basic_salary, current.basic_salary),
            ("allowances", self.allowances, current.allowances),
            ("tax", self.tax, current.tax),
            ("pf", self.pf, current.pf),
            ("deductions", self.deductions, current.deductions),
            ("net_salary", self.net_salary, current.net_salary),
        ];
        for (field, requested, stored) in locked {
            if requested.is_some_and(|value| value != stored) {
                return Err(Self::locked_field(current, field));
            }
        }
        if self.status.is_some_and(|status| status != current.status) {
            return Err(Self::locked_field(current, "status"));
        }

        Ok(SalaryRecord {
            name: self.name,
            designation: self.designation,
            department: self.department,
            ..current.clone()
        })
    }

    fn locked_field(current: &SalaryRecord, field: &str) -> PayrollError {
        PayrollError::InvalidRecord {
            id: current.id.clone(),
            message: format!("{} cannot be changed by replacement", field),
        }
    }
}
