//! Payroll calculation and batch disbursement engine.
//!
//! This crate derives salary components from configurable rates, runs a
//! cooperative multi-step disbursement over pending salary records, and
//! summarizes the results for display and export.

#![warn(missing_docs)]

pub mod api;
pub mod batch;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
pub mod report;
