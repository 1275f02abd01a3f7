//! Core data models for the payroll engine.
//!
//! This module contains the domain models shared by calculation, batch
//! processing and reporting.

mod salary_record;
mod summary;

pub use salary_record::{RecordStatus, SalaryRecord};
pub use summary::PayrollSummary;
