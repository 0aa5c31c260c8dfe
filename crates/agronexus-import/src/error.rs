//! Error types for the import pipeline.
//!
//! Row-level validation problems are not errors: they are recorded on the
//! [`ValidatedRecord`](crate::ValidatedRecord) as issues. The types here cover
//! the failures that stop an operation.

use std::path::PathBuf;
use thiserror::Error;

use crate::coordinator::ImportPhase;

/// Coarse payload problems that prevent validation from starting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// Payload is empty or whitespace only.
    #[error("import payload is empty")]
    EmptyPayload,

    /// First line carries no column names.
    #[error("import payload has no header row")]
    MissingHeader,

    /// Header present but no data lines follow.
    #[error("import payload has a header but no data rows")]
    NoDataRows,

    /// The delimited text could not be read.
    #[error("malformed payload at line {line}: {message}")]
    Malformed { line: u64, message: String },
}

/// Failure reported by a record sink for one record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// An animal with the same unique identifier already exists.
    #[error("animal '{identifier}' already exists")]
    Duplicate { identifier: String },

    /// The sink refused the record.
    #[error("record rejected: {reason}")]
    Rejected { reason: String },

    /// The sink could not be reached or written.
    #[error("record store unavailable: {message}")]
    Unavailable { message: String },
}

/// Errors raised by the persistent animal store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced by the import pipeline and its file helpers.
#[derive(Debug, Error)]
pub enum ImportError {
    // === Payload Errors ===
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// Import file not found.
    #[error("import file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the import file.
    #[error("failed to read import file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Import file exceeds the caller's size ceiling.
    #[error("import file {path} is {size} bytes, limit is {max_size} bytes")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Flow Errors ===
    /// Operation not allowed in the coordinator's current phase.
    #[error("cannot {operation} while import is in {phase} phase")]
    InvalidPhase {
        operation: &'static str,
        phase: ImportPhase,
    },

    // === Store Errors ===
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ImportError::InvalidPhase {
            operation: "commit",
            phase: ImportPhase::Upload,
        };
        assert_eq!(err.to_string(), "cannot commit while import is in upload phase");
    }

    #[test]
    fn test_structural_error_converts() {
        let err: ImportError = StructuralError::NoDataRows.into();
        assert_eq!(err.to_string(), "import payload has a header but no data rows");
    }
}
