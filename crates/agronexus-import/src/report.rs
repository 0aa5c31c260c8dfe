//! Aggregate outcome of validating one payload.

use serde::{Deserialize, Serialize};

use crate::record::{Outcome, ValidatedRecord};

/// Per-outcome record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCounts {
    pub total: usize,
    pub valid: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl ReportCounts {
    /// Count outcomes from scratch.
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a ValidatedRecord>) -> Self {
        let mut counts = Self::default();
        for record in records {
            counts.total += 1;
            match record.outcome {
                Outcome::Valid => counts.valid += 1,
                Outcome::Error => counts.errors += 1,
                Outcome::Warning => counts.warnings += 1,
            }
        }
        counts
    }
}

/// Validated records in payload order, plus their counts.
///
/// Counts are recomputed from the records after every mutation, so
/// `total == valid + errors + warnings` always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    records: Vec<ValidatedRecord>,
    counts: ReportCounts,
}

impl ImportReport {
    pub fn new(records: Vec<ValidatedRecord>) -> Self {
        let counts = ReportCounts::tally(&records);
        Self { records, counts }
    }

    pub fn records(&self) -> &[ValidatedRecord] {
        &self.records
    }

    pub fn counts(&self) -> ReportCounts {
        self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.total
    }

    pub fn valid_count(&self) -> usize {
        self.counts.valid
    }

    pub fn error_count(&self) -> usize {
        self.counts.errors
    }

    pub fn warning_count(&self) -> usize {
        self.counts.warnings
    }

    pub fn has_errors(&self) -> bool {
        self.counts.errors > 0
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row_number: u64) -> Option<&ValidatedRecord> {
        self.records.iter().find(|r| r.row_number == row_number)
    }

    /// Valid records in ascending row order.
    pub fn valid_records(&self) -> Vec<&ValidatedRecord> {
        let mut valid: Vec<&ValidatedRecord> =
            self.records.iter().filter(|r| r.is_valid()).collect();
        valid.sort_by_key(|r| r.row_number);
        valid
    }

    /// Drop the record at `row_number`. Returns whether anything was removed;
    /// discarding an absent row is a no-op.
    pub fn discard_row(&mut self, row_number: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.row_number != row_number);
        let removed = self.records.len() != before;
        if removed {
            self.counts = ReportCounts::tally(&self.records);
            tracing::debug!(row = row_number, remaining = self.counts.total, "Discarded row");
        }
        removed
    }

    pub fn into_records(self) -> Vec<ValidatedRecord> {
        self.records
    }
}
