//! Salary component derivation.
//!
//! This module composes the allowance, statutory deduction and net salary
//! rules into the full set of derived fields for one employee.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;

use super::allowances::calculate_allowances;
use super::net_salary::calculate_net_salary;
use super::statutory::calculate_deductions;

/// The derived pay fields for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryComponents {
    /// House rent plus fixed allowances.
    pub allowances: Decimal,
    /// Income tax withheld.
    pub tax: Decimal,
    /// Employee provident fund contribution.
    pub pf: Decimal,
    /// Tax, provident fund and professional tax combined.
    pub deductions: Decimal,
    /// Rounded take-home pay.
    pub net_salary: Decimal,
}

/// Derives every pay component from a basic salary and a rate snapshot.
///
/// Pure and deterministic. Net salary is not clamped, so a basic salary of
/// zero with non-zero fixed deductions may yield negative net pay.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_components;
/// use payroll_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig {
///     hra_percent: Decimal::from(20),
///     medical_fixed: Decimal::ZERO,
///     tds_rate: Decimal::from(10),
///     prof_tax: Decimal::from(100),
///     pf_enabled: true,
/// };
///
/// let components = compute_components(Decimal::from(5000), &config);
/// assert_eq!(components.allowances, Decimal::from(1000));
/// assert_eq!(components.tax, Decimal::from(600));
/// assert_eq!(components.pf, Decimal::from(600));
/// assert_eq!(components.deductions, Decimal::from(1300));
/// assert_eq!(components.net_salary, Decimal::from(4700));
/// ```
pub fn compute_components(basic_salary: Decimal, config: &PayrollConfig) -> SalaryComponents {
    let allowances = calculate_allowances(basic_salary, config).total;
    let deductions = calculate_deductions(basic_salary, allowances, config);
    let net_salary = calculate_net_salary(basic_salary, allowances, deductions.total);

    SalaryComponents {
        allowances,
        tax: deductions.tax,
        pf: deductions.pf,
        deductions: deductions.total,
        net_salary,
    }
}
