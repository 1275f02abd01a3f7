//! Payroll summary model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals over a set of salary records, ready for display or export.
///
/// All amounts are exact sums; rounding is left to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Sum of basic salary plus allowances.
    pub total_gross: Decimal,
    /// Sum of net salaries.
    pub total_net: Decimal,
    /// Gross minus net.
    pub total_deductions: Decimal,
    /// Sum of income tax withheld.
    pub total_tax: Decimal,
    /// Employee plus employer provident fund contributions.
    pub total_pf: Decimal,
    /// Professional tax across all records.
    pub total_prof_tax: Decimal,
    /// Number of records summarized.
    pub record_count: usize,
    /// Records still awaiting a batch run.
    pub pending_count: usize,
    /// Records already processed.
    pub processed_count: usize,
    /// Records on hold.
    pub hold_count: usize,
}
