//! Payroll report aggregation.
//!
//! This module summarizes a list of salary records into the totals shown on
//! the payroll dashboard and consumed by exports.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;
use crate::models::{PayrollSummary, RecordStatus, SalaryRecord};

/// Multiplier applied to the employee provident fund total to include the
/// matching employer contribution.
pub const PF_CONTRIBUTION_SIDES: u32 = 2;

/// Summarizes `records` into payroll totals.
///
/// Sums are exact. An empty slice yields all-zero totals.
///
/// # Examples
///
/// ```
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::PayrollSummary;
/// use payroll_engine::report::summarize;
///
/// let summary = summarize(&[], &PayrollConfig::default());
/// assert_eq!(summary, PayrollSummary::default());
/// ```
pub fn summarize(records: &[SalaryRecord], config: &PayrollConfig) -> PayrollSummary {
    let mut summary = records
        .iter()
        .fold(PayrollSummary::default(), |mut acc, record| {
            acc.total_gross += record.gross();
            acc.total_net += record.net_salary;
            acc.total_tax += record.tax;
            acc.total_pf += record.pf;
            match record.status {
                RecordStatus::Pending => acc.pending_count += 1,
                RecordStatus::Processed => acc.processed_count += 1,
                RecordStatus::Hold => acc.hold_count += 1,
            }
            acc
        });

    summary.record_count = records.len();
    summary.total_deductions = summary.total_gross - summary.total_net;
    summary.total_pf *= Decimal::from(PF_CONTRIBUTION_SIDES);
    summary.total_prof_tax = Decimal::from(records.len()) * config.prof_tax;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute_components;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn processed(id: &str, basic: &str, config: &PayrollConfig) -> SalaryRecord {
        let mut record = SalaryRecord::pending(id, id, "Engineer", "Engineering", dec(basic));
        record.apply_components(&compute_components(record.basic_salary, config));
        record.status = RecordStatus::Processed;
        record
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = summarize(&[], &PayrollConfig::default());

        assert_eq!(summary.total_gross, Decimal::ZERO);
        assert_eq!(summary.total_net, Decimal::ZERO);
        assert_eq!(summary.total_deductions, Decimal::ZERO);
        assert_eq!(summary.total_tax, Decimal::ZERO);
        assert_eq!(summary.total_pf, Decimal::ZERO);
        assert_eq!(summary.total_prof_tax, Decimal::ZERO);
        assert_eq!(summary.record_count, 0);
    }

    #[test]
    fn test_single_record_totals() {
        let config = PayrollConfig {
            hra_percent: dec("20"),
            medical_fixed: dec("0"),
            tds_rate: dec("10"),
            prof_tax: dec("100"),
            pf_enabled: true,
        };
        let records = vec![processed("EMP001", "5000", &config)];

        let summary = summarize(&records, &config);

        assert_eq!(summary.total_gross, dec("6000"));
        assert_eq!(summary.total_net, dec("4700"));
        assert_eq!(summary.total_deductions, dec("1300"));
        assert_eq!(summary.total_tax, dec("600"));
        assert_eq!(summary.total_pf, dec("1200"));
        assert_eq!(summary.total_prof_tax, dec("100"));
        assert_eq!(summary.processed_count, 1);
    }

    #[test]
    fn test_prof_tax_counts_every_record() {
        let config = PayrollConfig::default();
        let mut held = SalaryRecord::pending("EMP002", "Held", "Clerk", "Ops", dec("30000"));
        held.status = RecordStatus::Hold;
        let records = vec![
            processed("EMP001", "50000", &config),
            held,
            SalaryRecord::pending("EMP003", "New", "Clerk", "Ops", dec("20000")),
        ];

        let summary = summarize(&records, &config);

        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.total_prof_tax, dec("600"));
        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.hold_count, 1);
        // Unprocessed records contribute their basic salary to gross only.
        assert_eq!(summary.total_gross, dec("71250") + dec("30000") + dec("20000"));
        assert_eq!(summary.total_net, dec("57925"));
    }

    #[test]
    fn test_sums_are_exact() {
        let config = PayrollConfig {
            hra_percent: dec("15"),
            medical_fixed: dec("0"),
            tds_rate: dec("7"),
            prof_tax: dec("0"),
            pf_enabled: false,
        };
        let records = vec![
            processed("EMP001", "1234", &config),
            processed("EMP002", "1234", &config),
        ];

        let summary = summarize(&records, &config);

        assert_eq!(summary.total_tax, dec("198.674"));
        assert_eq!(summary.total_gross, dec("2838.2"));
    }
}
