//! Error types for catalog loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    // === File System Errors ===
    /// Catalog file not found.
    #[error("catalog file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a catalog file.
    #[error("failed to read catalog file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// Failed to parse a catalog table.
    #[error("failed to parse catalog table {table}: {source}")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },

    /// Required column not found in a catalog table.
    #[error("required column '{column}' not found in catalog table {table}")]
    MissingColumn { column: String, table: String },

    /// A cell could not be interpreted.
    #[error("invalid {field} value '{value}' in catalog table {table} (line {line})")]
    InvalidValue {
        table: String,
        field: String,
        value: String,
        line: u64,
    },

    // === Consistency Errors ===
    /// The species table is empty.
    #[error("catalog defines no species")]
    EmptyCatalog,

    /// Two species rows share a code.
    #[error("duplicate species code '{code}'")]
    DuplicateSpecies { code: String },

    /// A breed or category row points at a species that does not exist.
    #[error("catalog table {table} references unknown species '{species}'")]
    UnknownSpecies { table: String, species: String },

    /// A breed name or category code is listed twice for one species.
    #[error("duplicate {kind} '{value}' for species '{species}'")]
    Duplicate {
        kind: &'static str,
        species: String,
        value: String,
    },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
