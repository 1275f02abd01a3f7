//! Statutory deduction calculation functionality.
//!
//! This module provides functions for the income tax withheld at source,
//! the employee provident fund contribution and the combined deduction.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;

/// Provident fund rate as a fraction of basic salary (12%).
///
/// Fixed; configuration only switches the deduction on or off.
pub fn provident_fund_rate() -> Decimal {
    Decimal::new(12, 2)
}

/// Calculates income tax withheld on the taxable base.
///
/// The taxable base is basic salary plus allowances, and `tds_rate` is a
/// whole-number percentage.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_tds;
/// use rust_decimal::Decimal;
///
/// let tax = calculate_tds(Decimal::from(6000), Decimal::from(10));
/// assert_eq!(tax, Decimal::from(600));
/// ```
pub fn calculate_tds(taxable_base: Decimal, tds_rate: Decimal) -> Decimal {
    taxable_base * tds_rate / Decimal::ONE_HUNDRED
}

/// Calculates the employee provident fund contribution.
///
/// Returns zero when the deduction is disabled.
pub fn calculate_provident_fund(basic_salary: Decimal, pf_enabled: bool) -> Decimal {
    if pf_enabled {
        basic_salary * provident_fund_rate()
    } else {
        Decimal::ZERO
    }
}

/// The statutory deductions for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatutoryDeductions {
    /// Income tax withheld.
    pub tax: Decimal,
    /// Employee provident fund contribution.
    pub pf: Decimal,
    /// Flat professional tax.
    pub prof_tax: Decimal,
    /// Sum of tax, provident fund and professional tax.
    pub total: Decimal,
}

/// Calculates every statutory deduction under `config`.
pub fn calculate_deductions(
    basic_salary: Decimal,
    allowances: Decimal,
    config: &PayrollConfig,
) -> StatutoryDeductions {
    let tax = calculate_tds(basic_salary + allowances, config.tds_rate);
    let pf = calculate_provident_fund(basic_salary, config.pf_enabled);
    let prof_tax = config.prof_tax;

    StatutoryDeductions {
        tax,
        pf,
        prof_tax,
        total: tax + pf + prof_tax,
    }
}
