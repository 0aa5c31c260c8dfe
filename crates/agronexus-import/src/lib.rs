//! Bulk animal import.
//!
//! A spreadsheet export of animal records goes through four stages:
//!
//! 1. **Payload**: bytes are decoded ([`decode_payload`]) and split into a
//!    header plus data rows ([`parse_payload`]). Only structural problems
//!    (empty payload, no header, no data rows) stop the import here.
//! 2. **Validation**: every row is checked by a [`RowValidator`] against the
//!    field rules and a [`Catalog`](agronexus_schema::Catalog). Problems are
//!    recorded as [`Issue`]s on the [`ValidatedRecord`]; nothing fails.
//! 3. **Review**: the caller inspects the [`ImportReport`] and may discard rows.
//! 4. **Commit**: valid rows are handed one at a time to a [`RecordSink`]
//!    such as [`AnimalStore`]. Per-row failures are collected in the
//!    [`CommitSummary`].
//!
//! [`ImportCoordinator`] drives these stages as a state machine.
//!
//! # Example
//!
//! ```ignore
//! use agronexus_import::{AnimalStore, ImportConfig, ImportCoordinator, RowValidator};
//! use agronexus_schema::SchemaRegistry;
//!
//! let registry = SchemaRegistry::embedded()?;
//! let mut coordinator =
//!     ImportCoordinator::new(RowValidator::new(&registry), ImportConfig::default());
//! let counts = coordinator.load(&payload)?;
//! println!("{} of {} rows are valid", counts.valid, counts.total);
//!
//! let mut store = AnimalStore::new();
//! let summary = coordinator.commit(&mut store)?;
//! ```

pub mod animal;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod export;
pub mod payload;
pub mod progress;
pub mod record;
pub mod report;
pub mod sink;
pub mod store;
pub mod template;
pub mod validate;

pub use animal::{Origin, Sex};
pub use config::{ImportConfig, MAX_IMPORT_FILE_SIZE, RECOMMENDED_MAX_ROWS};
pub use coordinator::{
    CommitFailure, CommitSummary, CommittedRow, ImportCoordinator, ImportPhase, commit_valid,
    validate_all,
};
pub use error::{ImportError, Result, SinkError, StoreError, StructuralError};
pub use payload::{ParsedRow, ParsedRows, decode_payload, parse_payload, read_payload_file};
pub use progress::{Progress, ProgressPhase};
pub use record::{AnimalField, Outcome, RawRecord, ValidatedRecord};
pub use report::{ImportReport, ReportCounts};
pub use sink::RecordSink;
pub use store::{AnimalFilter, AnimalRecord, AnimalStore, HerdStatistics, STATUS_ACTIVE};
pub use template::{template_headers, template_payload};
pub use validate::{Issue, RowValidator};
