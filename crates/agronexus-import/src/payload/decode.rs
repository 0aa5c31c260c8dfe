//! Byte-level decoding of import files.

use std::path::Path;

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::config::ImportConfig;
use crate::error::{ImportError, Result};

/// Decode payload bytes into text.
///
/// - A BOM (UTF-8, UTF-16 LE/BE) selects the encoding and is stripped.
/// - Otherwise valid UTF-8 is used as-is.
/// - Anything else is decoded as Windows-1252, the usual spreadsheet export
///   encoding for Portuguese text.
pub fn decode_payload(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            tracing::warn!(
                encoding = encoding.name(),
                "Payload contains malformed sequences; replaced with U+FFFD"
            );
        }
        return text.into_owned();
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::debug!("Payload is not UTF-8; decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

/// Read and decode an import file, enforcing the configured size ceiling.
///
/// The ceiling is caller policy; the parser itself has no size limit.
pub fn read_payload_file(path: &Path, config: &ImportConfig) -> Result<String> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;

    if metadata.len() > config.max_file_size {
        return Err(ImportError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: config.max_file_size,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read import file");
    Ok(decode_payload(&bytes))
}

fn io_error(path: &Path, source: std::io::Error) -> ImportError {
    if source.kind() == std::io::ErrorKind::NotFound {
        ImportError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        ImportError::FileRead {
            path: path.to_path_buf(),
            source,
        }
    }
}
