//! End-to-end import flow: payload → validation → review → commit.
//!
//! The free functions [`validate_all`] and [`commit_valid`] are the pipeline
//! stages; [`ImportCoordinator`] wraps them in the Upload → Validation →
//! Committing → Done state machine a caller drives.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::config::ImportConfig;
use crate::error::{ImportError, Result, StructuralError};
use crate::payload::{ParsedRows, parse_payload};
use crate::progress::{Progress, ProgressPhase};
use crate::record::RawRecord;
use crate::report::{ImportReport, ReportCounts};
use crate::sink::RecordSink;
use crate::validate::RowValidator;

/// Phase of an import attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPhase {
    Upload,
    Validation,
    Committing,
    Done,
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Upload => "upload",
            Self::Validation => "validation",
            Self::Committing => "committing",
            Self::Done => "done",
        })
    }
}

/// A record that was persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommittedRow {
    pub row_number: u64,
    pub id: String,
}

/// A valid record the sink failed to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitFailure {
    pub row_number: u64,
    pub reason: String,
}

/// Result of committing the valid subset of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub committed: usize,
    pub committed_rows: Vec<CommittedRow>,
    pub failed: Vec<CommitFailure>,
    /// Valid rows not attempted because the commit was cancelled.
    pub skipped: usize,
    pub cancelled: bool,
}

impl CommitSummary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Validate every parsed row, preserving payload order.
///
/// Row numbers are the physical payload lines (header = 1).
pub fn validate_all(
    validator: &RowValidator<'_>,
    parsed: &ParsedRows,
    progress: &mut dyn FnMut(Progress),
) -> ImportReport {
    let total = parsed.rows.len();
    let mut records = Vec::with_capacity(total);

    for (idx, row) in parsed.rows.iter().enumerate() {
        let raw = RawRecord::from_row(&parsed.headers, &row.values);
        records.push(validator.validate(&raw, row.line));
        progress(Progress {
            phase: ProgressPhase::Validating,
            completed: idx + 1,
            total,
        });
    }

    let report = ImportReport::new(records);
    tracing::info!(
        total = report.total(),
        valid = report.valid_count(),
        errors = report.error_count(),
        "Validated import rows"
    );
    report
}

/// Submit the valid records of `report` to `sink`, one at a time, in
/// ascending row order.
///
/// A sink failure is recorded against its row and the loop continues. When
/// `cancel` is set before a row is attempted, the remaining rows are skipped;
/// rows already committed stay committed.
pub fn commit_valid(
    report: &ImportReport,
    sink: &mut dyn RecordSink,
    progress: &mut dyn FnMut(Progress),
    cancel: Option<&AtomicBool>,
) -> CommitSummary {
    let valid = report.valid_records();
    let total = valid.len();
    let mut summary = CommitSummary::default();

    for (idx, record) in valid.iter().enumerate() {
        if cancel.is_some_and(|flag| flag.load(Ordering::Acquire)) {
            summary.cancelled = true;
            summary.skipped = total - idx;
            tracing::warn!(
                committed = summary.committed,
                skipped = summary.skipped,
                "Commit cancelled"
            );
            break;
        }

        match sink.add(record) {
            Ok(id) => {
                tracing::debug!(row = record.row_number, id = %id, "Committed row");
                summary.committed += 1;
                summary.committed_rows.push(CommittedRow {
                    row_number: record.row_number,
                    id,
                });
            }
            Err(error) => {
                // Sink messages can carry animal identifiers
                tracing::warn!(row = record.row_number, "Failed to commit row");
                summary.failed.push(CommitFailure {
                    row_number: record.row_number,
                    reason: error.to_string(),
                });
            }
        }

        progress(Progress {
            phase: ProgressPhase::Committing,
            completed: idx + 1,
            total,
        });
    }

    tracing::info!(
        committed = summary.committed,
        failed = summary.failed.len(),
        skipped = summary.skipped,
        "Import commit finished"
    );
    summary
}

enum State {
    Upload,
    Validation { report: ImportReport },
    Committing,
    Done {
        report: ImportReport,
        summary: CommitSummary,
    },
}

impl State {
    fn phase(&self) -> ImportPhase {
        match self {
            State::Upload => ImportPhase::Upload,
            State::Validation { .. } => ImportPhase::Validation,
            State::Committing => ImportPhase::Committing,
            State::Done { .. } => ImportPhase::Done,
        }
    }
}

type Observer<'a> = Box<dyn FnMut(Progress) + 'a>;

/// Drives one import attempt at a time.
pub struct ImportCoordinator<'a> {
    validator: RowValidator<'a>,
    config: ImportConfig,
    state: State,
    observer: Option<Observer<'a>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> ImportCoordinator<'a> {
    pub fn new(validator: RowValidator<'a>, config: ImportConfig) -> Self {
        Self {
            validator,
            config,
            state: State::Upload,
            observer: None,
            cancel: None,
        }
    }

    /// Register a callback receiving validation and commit progress.
    #[must_use]
    pub fn with_observer(mut self, observer: impl FnMut(Progress) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Share a flag that, once set, stops the commit before the next row.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn phase(&self) -> ImportPhase {
        self.state.phase()
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// The current report, in Validation and Done phases.
    pub fn report(&self) -> Option<&ImportReport> {
        match &self.state {
            State::Validation { report } | State::Done { report, .. } => Some(report),
            State::Upload | State::Committing => None,
        }
    }

    /// The commit summary, in Done phase.
    pub fn summary(&self) -> Option<&CommitSummary> {
        match &self.state {
            State::Done { summary, .. } => Some(summary),
            _ => None,
        }
    }

    /// Structural checks on a payload. Does not change phase.
    pub fn accept_payload(&self, text: &str) -> std::result::Result<ParsedRows, StructuralError> {
        parse_payload(text, &self.config)
    }

    /// Parse and validate a payload, moving from Upload to Validation.
    ///
    /// On a structural error the coordinator stays in Upload. Row-level
    /// problems never fail this call; a report with zero valid rows is normal.
    pub fn load(&mut self, text: &str) -> Result<ReportCounts> {
        self.expect_phase(ImportPhase::Upload, "load a payload")?;

        let parsed = self.accept_payload(text).inspect_err(|error| {
            tracing::warn!(%error, "Rejected import payload");
        })?;

        let observer = &mut self.observer;
        let mut notify = |progress: Progress| {
            if let Some(observer) = observer.as_mut() {
                observer(progress);
            }
        };
        let report = validate_all(&self.validator, &parsed, &mut notify);
        let counts = report.counts();
        self.state = State::Validation { report };
        Ok(counts)
    }

    /// Remove a row from the report under review. Absent rows are ignored.
    pub fn discard_row(&mut self, row_number: u64) -> Result<ReportCounts> {
        match &mut self.state {
            State::Validation { report } => {
                report.discard_row(row_number);
                Ok(report.counts())
            }
            other => Err(ImportError::InvalidPhase {
                operation: "discard a row",
                phase: other.phase(),
            }),
        }
    }

    /// Commit the valid rows of the report, moving through Committing to Done.
    pub fn commit(&mut self, sink: &mut dyn RecordSink) -> Result<CommitSummary> {
        let report = match std::mem::replace(&mut self.state, State::Committing) {
            State::Validation { report } => report,
            other => {
                let phase = other.phase();
                self.state = other;
                return Err(ImportError::InvalidPhase {
                    operation: "commit",
                    phase,
                });
            }
        };

        let observer = &mut self.observer;
        let mut notify = |progress: Progress| {
            if let Some(observer) = observer.as_mut() {
                observer(progress);
            }
        };
        let summary = commit_valid(&report, sink, &mut notify, self.cancel.as_deref());

        self.state = State::Done {
            report,
            summary: summary.clone(),
        };
        Ok(summary)
    }

    /// Discard payload, report, and summary; back to Upload.
    pub fn restart(&mut self) {
        tracing::debug!(from = %self.phase(), "Restarting import");
        self.state = State::Upload;
        if let Some(flag) = &self.cancel {
            flag.store(false, Ordering::Release);
        }
    }

    fn expect_phase(&self, expected: ImportPhase, operation: &'static str) -> Result<()> {
        let phase = self.phase();
        if phase == expected {
            Ok(())
        } else {
            Err(ImportError::InvalidPhase { operation, phase })
        }
    }
}

impl fmt::Debug for ImportCoordinator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportCoordinator")
            .field("phase", &self.phase())
            .field("config", &self.config)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}
