//! Salary record storage for the payroll engine.
//!
//! This module holds the ordered record set and the filtered views the
//! presentation layer reads from.

mod record_set;

pub use record_set::{PayrollRecordSet, StatusCounts};

pub(crate) use record_set::ensure_unique_ids;
