//! Import configuration.

use serde::{Deserialize, Serialize};

/// Largest file a caller should hand to the pipeline (5 MB).
pub const MAX_IMPORT_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Row count above which callers should warn before importing.
pub const RECOMMENDED_MAX_ROWS: usize = 1000;

/// Payload parsing options plus the caller-side limits.
///
/// `max_file_size` and `recommended_max_rows` are policy for whoever reads the
/// file; the coordinator itself accepts any number of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Honor double-quoted fields. When false, lines are split on every delimiter.
    pub quoting: bool,
    /// Trim surrounding whitespace from headers and values.
    pub trim: bool,
    /// Maximum import file size in bytes.
    pub max_file_size: u64,
    /// Row count above which a warning is logged.
    pub recommended_max_rows: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quoting: true,
            trim: true,
            max_file_size: MAX_IMPORT_FILE_SIZE,
            recommended_max_rows: RECOMMENDED_MAX_ROWS,
        }
    }
}

impl ImportConfig {
    /// Plain split on the delimiter with no quote handling.
    pub fn naive_split() -> Self {
        Self {
            quoting: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_quoting(mut self, enable: bool) -> Self {
        self.quoting = enable;
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    #[must_use]
    pub fn with_recommended_max_rows(mut self, rows: usize) -> Self {
        self.recommended_max_rows = rows;
        self
    }
}
