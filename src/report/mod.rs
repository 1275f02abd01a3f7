//! Reporting over salary records.

mod aggregator;

pub use aggregator::{PF_CONTRIBUTION_SIDES, summarize};
