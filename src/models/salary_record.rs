//! Salary record model and its lifecycle status.
//!
//! This module defines the [`SalaryRecord`] struct and [`RecordStatus`] enum
//! for representing one employee's pay for the current cycle.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::SalaryComponents;

/// The lifecycle state of a salary record.
///
/// Records move from `Pending` to `Processed` only through a completed batch
/// run. `Hold` is an exception state that batch runs never touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Awaiting the next batch run.
    Pending,
    /// Computed and disbursed.
    Processed,
    /// Held back until manually released.
    Hold,
}

impl RecordStatus {
    /// The lowercase status name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Processed => "processed",
            RecordStatus::Hold => "hold",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One employee's salary record for the pay cycle.
///
/// The derived fields (`allowances`, `tax`, `pf`, `deductions`,
/// `net_salary`) may be omitted in seed data; they are filled in when a
/// batch run processes the record.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{RecordStatus, SalaryRecord};
/// use rust_decimal::Decimal;
///
/// let record = SalaryRecord::pending(
///     "EMP001",
///     "Aarav Sharma",
///     "Software Engineer",
///     "Engineering",
///     Decimal::from(50000),
/// );
/// assert_eq!(record.status, RecordStatus::Pending);
/// assert!(record.net_salary.is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Stable employee identifier.
    pub id: String,
    /// Employee display name.
    pub name: String,
    /// Job title.
    pub designation: String,
    /// Department name.
    pub department: String,
    /// Fixed base pay.
    pub basic_salary: Decimal,
    /// House rent plus fixed allowances.
    #[serde(default)]
    pub allowances: Decimal,
    /// Income tax withheld.
    #[serde(default)]
    pub tax: Decimal,
    /// Employee provident fund contribution.
    #[serde(default)]
    pub pf: Decimal,
    /// Tax, provident fund and professional tax combined.
    #[serde(default)]
    pub deductions: Decimal,
    /// Take-home pay, rounded to a whole currency unit.
    #[serde(default)]
    pub net_salary: Decimal,
    /// Lifecycle state.
    pub status: RecordStatus,
}

impl SalaryRecord {
    /// Creates a pending record with zeroed derived fields.
    pub fn pending(
        id: impl Into<String>,
        name: impl Into<String>,
        designation: impl Into<String>,
        department: impl Into<String>,
        basic_salary: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            designation: designation.into(),
            department: department.into(),
            basic_salary,
            allowances: Decimal::ZERO,
            tax: Decimal::ZERO,
            pf: Decimal::ZERO,
            deductions: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            status: RecordStatus::Pending,
        }
    }

    /// Gross pay: basic salary plus allowances.
    pub fn gross(&self) -> Decimal {
        self.basic_salary + self.allowances
    }

    /// Returns true if the record awaits a batch run.
    pub fn is_pending(&self) -> bool {
        self.status == RecordStatus::Pending
    }

    /// Overwrites the derived fields with freshly computed components.
    ///
    /// Leaves `basic_salary` and `status` alone.
    pub fn apply_components(&mut self, components: &SalaryComponents) {
        self.allowances = components.allowances;
        self.tax = components.tax;
        self.pf = components.pf;
        self.deductions = components.deductions;
        self.net_salary = components.net_salary;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RecordStatus::Processed).unwrap(),
            "\"processed\""
        );
        let status: RecordStatus = serde_json::from_str("\"hold\"").unwrap();
        assert_eq!(status, RecordStatus::Hold);
    }

    #[test]
    fn test_deserialize_seed_record_without_derived_fields() {
        let json = r#"{
            "id": "EMP002",
            "name": "Priya Patel",
            "designation": "HR Manager",
            "department": "Human Resources",
            "basic_salary": "45000",
            "status": "pending"
        }"#;

        let record: SalaryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.basic_salary, Decimal::from(45000));
        assert!(record.deductions.is_zero());
        assert!(record.is_pending());
    }

    #[test]
    fn test_apply_components_keeps_status_and_basic() {
        let mut record = SalaryRecord::pending("EMP003", "Rohan", "Analyst", "Finance", Decimal::from(5000));
        let components = SalaryComponents {
            allowances: Decimal::from(1000),
            tax: Decimal::from(600),
            pf: Decimal::from(600),
            deductions: Decimal::from(1300),
            net_salary: Decimal::from(4700),
        };

        record.apply_components(&components);

        assert_eq!(record.gross(), Decimal::from(6000));
        assert_eq!(record.net_salary, Decimal::from(4700));
        assert_eq!(record.basic_salary, Decimal::from(5000));
        assert_eq!(record.status, RecordStatus::Pending);
    }
}
