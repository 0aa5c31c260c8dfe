//! Import pipeline stages as driven from the command line.
//!
//! 1. **Catalog**: Load the embedded catalog or a catalog directory
//! 2. **Read**: Enforce the file size ceiling and decode the file
//! 3. **Review**: Validate, warn on oversized imports, discard requested rows
//! 4. **Commit**: Add valid rows to the JSON store and save it
//!
//! The same functions back `check`, `import`, and `export`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use agronexus_import::export::write_csv;
use agronexus_import::{
    AnimalFilter, AnimalStore, CommitSummary, ImportConfig, ImportCoordinator, ReportCounts,
    read_payload_file,
};
use agronexus_schema::SchemaRegistry;

use crate::logging::redact_value;

// ============================================================================
// Stage 1: Catalog
// ============================================================================

/// Load the catalog from `dir`, or the built-in one.
pub fn load_catalog(dir: Option<&Path>) -> Result<SchemaRegistry> {
    match dir {
        Some(dir) => SchemaRegistry::load_dir(dir)
            .with_context(|| format!("load catalog from {}", dir.display())),
        None => SchemaRegistry::embedded().context("load built-in catalog"),
    }
}

/// Build the import configuration from CLI flags.
pub fn import_config(delimiter: char, quoting: bool) -> Result<ImportConfig> {
    if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' {
        bail!("delimiter must be a single ASCII character other than quote or newline, got {delimiter:?}");
    }
    Ok(ImportConfig::default()
        .with_delimiter(delimiter as u8)
        .with_quoting(quoting))
}

// ============================================================================
// Stage 2: Read
// ============================================================================

/// Read and decode an import file, enforcing the size ceiling.
pub fn read_payload(path: &Path, config: &ImportConfig) -> Result<String> {
    let text = read_payload_file(path, config)
        .with_context(|| format!("read import file {}", path.display()))?;
    info!(path = %path.display(), "Read import file");
    Ok(text)
}

// ============================================================================
// Stage 3: Review
// ============================================================================

/// Validate `text` and drop the `discard` rows from the report.
///
/// Requested rows that are not in the report are logged and ignored.
pub fn review(
    coordinator: &mut ImportCoordinator<'_>,
    text: &str,
    discard: &[u64],
) -> Result<ReportCounts> {
    let mut counts = coordinator.load(text).context("validate import payload")?;

    let recommended = coordinator.config().recommended_max_rows;
    if counts.total > recommended {
        warn!(
            rows = counts.total,
            recommended, "Import has more rows than recommended; consider splitting the file"
        );
    }

    for &row in discard {
        let identifier = coordinator
            .report()
            .and_then(|report| report.get(row))
            .map(|record| record.identifier.clone());
        match identifier {
            Some(identifier) => {
                counts = coordinator.discard_row(row)?;
                debug!(row, identifier = redact_value(&identifier), "Discarded row");
            }
            None => warn!(row, "Row to discard is not in the report"),
        }
    }

    info!(
        total = counts.total,
        valid = counts.valid,
        errors = counts.errors,
        "Import reviewed"
    );
    Ok(counts)
}

// ============================================================================
// Stage 4: Commit
// ============================================================================

/// Commit the reviewed rows into the store at `store_path` and save it.
///
/// The store is saved whenever at least one row was committed, even if other
/// rows failed.
pub fn commit_to_store(
    coordinator: &mut ImportCoordinator<'_>,
    store_path: &Path,
) -> Result<CommitSummary> {
    let mut store = AnimalStore::load(store_path)
        .with_context(|| format!("open store {}", store_path.display()))?;
    let summary = coordinator.commit(&mut store).context("commit import")?;

    for failure in &summary.failed {
        let identifier = coordinator
            .report()
            .and_then(|report| report.get(failure.row_number))
            .map_or("", |record| record.identifier.as_str());
        warn!(
            row = failure.row_number,
            identifier = redact_value(identifier),
            reason = redact_value(&failure.reason),
            "Row not imported"
        );
    }

    if summary.committed > 0 {
        store
            .save(store_path)
            .with_context(|| format!("save store {}", store_path.display()))?;
    }
    info!(
        committed = summary.committed,
        failed = summary.failed.len(),
        animals = store.len(),
        "Import committed"
    );
    Ok(summary)
}

// ============================================================================
// Export
// ============================================================================

/// Write the animals of the store matching `filter` as a herd report.
pub fn export_store<W: Write>(
    store_path: &Path,
    filter: &AnimalFilter,
    writer: W,
    today: NaiveDate,
) -> Result<usize> {
    let store = AnimalStore::load(store_path)
        .with_context(|| format!("open store {}", store_path.display()))?;
    let animals = store.search(filter);
    let written = write_csv(animals, writer, today).context("write herd report")?;
    info!(rows = written, "Exported herd report");
    Ok(written)
}
