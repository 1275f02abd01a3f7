//! Calculation logic for the payroll engine.
//!
//! This module contains the pure salary component functions: house rent and
//! fixed allowances, income tax withheld at source, provident fund,
//! professional tax, and rounded net salary.

mod allowances;
mod components;
mod net_salary;
mod statutory;

pub use allowances::{AllowanceBreakdown, calculate_allowances, calculate_hra};
pub use components::{SalaryComponents, compute_components};
pub use net_salary::{calculate_net_salary, round_currency};
pub use statutory::{
    StatutoryDeductions, calculate_deductions, calculate_provident_fund, calculate_tds,
    provident_fund_rate,
};
