//! The authoritative collection of salary records.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::compute_components;
use crate::config::PayrollConfig;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{RecordStatus, SalaryRecord};

/// Per-status record counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    /// Records awaiting a batch run.
    pub pending: usize,
    /// Records already processed.
    pub processed: usize,
    /// Records on hold.
    pub hold: usize,
}

/// Ordered set of salary records keyed by employee id.
///
/// Insertion order is preserved by every view.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{RecordStatus, SalaryRecord};
/// use payroll_engine::records::PayrollRecordSet;
/// use rust_decimal::Decimal;
///
/// let records = PayrollRecordSet::new(vec![
///     SalaryRecord::pending("EMP001", "Aarav Sharma", "Engineer", "Engineering", Decimal::from(50000)),
/// ])?;
/// assert_eq!(records.filter_by_status(RecordStatus::Pending).len(), 1);
/// assert_eq!(records.search("aarav").len(), 1);
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayrollRecordSet {
    records: Vec<SalaryRecord>,
}

impl PayrollRecordSet {
    /// Builds a record set, rejecting duplicate employee ids.
    pub fn new(records: Vec<SalaryRecord>) -> PayrollResult<Self> {
        ensure_unique_ids(&records)?;
        Ok(Self { records })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SalaryRecord> {
        self.records.iter()
    }

    /// All records as a slice.
    pub fn as_slice(&self) -> &[SalaryRecord] {
        &self.records
    }

    /// Looks up a record by employee id.
    pub fn get(&self, id: &str) -> Option<&SalaryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut SalaryRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// All records with the given status, in insertion order.
    pub fn filter_by_status(&self, status: RecordStatus) -> Vec<&SalaryRecord> {
        self.records.iter().filter(|r| r.status == status).collect()
    }

    /// Records whose name or id contains `query`, ignoring case.
    ///
    /// An empty query matches every record.
    pub fn search(&self, query: &str) -> Vec<&SalaryRecord> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.name.to_lowercase().contains(&needle)
                    || r.id.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Replaces the descriptive fields of the record with the given id.
    ///
    /// Name, designation and department are taken from `updated`. Basic
    /// salary, status and the derived components stay as stored; only a
    /// batch run changes them. Returns false, changing nothing, if no record
    /// has that id.
    pub fn replace(&mut self, id: &str, updated: SalaryRecord) -> bool {
        match self.get_mut(id) {
            Some(slot) => {
                slot.name = updated.name;
                slot.designation = updated.designation;
                slot.department = updated.department;
                true
            }
            None => {
                debug!(id, "Replace ignored for unknown record");
                false
            }
        }
    }

    /// Moves a held record back to pending.
    ///
    /// Returns false if the id is unknown or the record is not on hold.
    pub fn release_hold(&mut self, id: &str) -> bool {
        self.transition(id, RecordStatus::Hold, RecordStatus::Pending)
    }

    /// Puts a pending record on hold.
    ///
    /// Returns false if the id is unknown or the record is not pending.
    pub fn hold(&mut self, id: &str) -> bool {
        self.transition(id, RecordStatus::Pending, RecordStatus::Hold)
    }

    fn transition(&mut self, id: &str, from: RecordStatus, to: RecordStatus) -> bool {
        match self.get_mut(id) {
            Some(record) if record.status == from => {
                record.status = to;
                true
            }
            _ => false,
        }
    }

    /// Number of records awaiting a batch run.
    pub fn pending_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_pending()).count()
    }

    /// Counts records per status.
    pub fn status_counts(&self) -> StatusCounts {
        self.records
            .iter()
            .fold(StatusCounts::default(), |mut counts, record| {
                match record.status {
                    RecordStatus::Pending => counts.pending += 1,
                    RecordStatus::Processed => counts.processed += 1,
                    RecordStatus::Hold => counts.hold += 1,
                }
                counts
            })
    }

    /// Total basic salary across pending records.
    pub fn pending_basic_total(&self) -> Decimal {
        self.records
            .iter()
            .filter(|r| r.is_pending())
            .map(|r| r.basic_salary)
            .sum()
    }

    /// Recomputes every pending record under `config` and marks it processed.
    ///
    /// Processed and held records are left untouched. Returns the ids that
    /// were processed, in insertion order.
    pub fn recompute_pending(&mut self, config: &PayrollConfig) -> Vec<String> {
        let mut processed = Vec::new();
        for record in self.records.iter_mut().filter(|r| r.is_pending()) {
            let components = compute_components(record.basic_salary, config);
            record.apply_components(&components);
            record.status = RecordStatus::Processed;
            processed.push(record.id.clone());
        }
        processed
    }
}

/// Fails with [`PayrollError::InvalidRecord`] on the first repeated id.
pub(crate) fn ensure_unique_ids(records: &[SalaryRecord]) -> PayrollResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(PayrollError::InvalidRecord {
                id: record.id.clone(),
                message: "duplicate employee id".to_string(),
            });
        }
    }
    Ok(())
}
