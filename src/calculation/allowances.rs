//! Allowance calculation functionality.
//!
//! This module derives the house rent allowance and the total allowance
//! component added on top of basic salary.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;

/// The allowance breakdown for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowanceBreakdown {
    /// House rent allowance.
    pub hra: Decimal,
    /// Flat medical allowance.
    pub medical: Decimal,
    /// Sum of all allowances.
    pub total: Decimal,
}

/// Calculates house rent allowance as a percentage of basic salary.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_hra;
/// use rust_decimal::Decimal;
///
/// let hra = calculate_hra(Decimal::from(5000), Decimal::from(20));
/// assert_eq!(hra, Decimal::from(1000));
/// ```
pub fn calculate_hra(basic_salary: Decimal, hra_percent: Decimal) -> Decimal {
    basic_salary * hra_percent / Decimal::ONE_HUNDRED
}

/// Calculates the full allowance breakdown under `config`.
pub fn calculate_allowances(basic_salary: Decimal, config: &PayrollConfig) -> AllowanceBreakdown {
    let hra = calculate_hra(basic_salary, config.hra_percent);
    let medical = config.medical_fixed;

    AllowanceBreakdown {
        hra,
        medical,
        total: hra + medical,
    }
}
