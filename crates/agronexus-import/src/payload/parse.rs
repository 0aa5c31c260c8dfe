//! Delimited-text parsing into header + data rows.

use serde::Serialize;

use crate::config::ImportConfig;
use crate::error::StructuralError;

/// One data line of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRow {
    /// Physical line the record starts on (header is line 1).
    pub line: u64,
    pub values: Vec<String>,
}

/// A structurally sound payload: header columns plus at least one data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRows {
    pub headers: Vec<String>,
    pub rows: Vec<ParsedRow>,
}

impl ParsedRows {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split a payload into header and data rows.
///
/// Blank lines are skipped. Records may be shorter or longer than the header.
///
/// # Errors
///
/// Returns a [`StructuralError`] when the payload is empty, the header carries
/// no column names, no data rows follow, or the text cannot be read.
pub fn parse_payload(text: &str, config: &ImportConfig) -> Result<ParsedRows, StructuralError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(StructuralError::EmptyPayload);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(config.delimiter)
        .quoting(config.quoting)
        .trim(if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| StructuralError::Malformed {
            line: e.position().map_or(0, csv::Position::line),
            message: e.to_string(),
        })?;
        let line = record.position().map_or(0, csv::Position::line);
        let values: Vec<String> = record.iter().map(str::to_string).collect();

        if values.iter().all(|v| v.trim().is_empty()) && values.len() <= 1 {
            // Whitespace-only line
            continue;
        }

        if headers.is_none() {
            if values.iter().all(|v| v.trim().is_empty()) {
                return Err(StructuralError::MissingHeader);
            }
            headers = Some(values);
            continue;
        }

        rows.push(ParsedRow { line, values });
    }

    let headers = headers.ok_or(StructuralError::MissingHeader)?;
    if rows.is_empty() {
        return Err(StructuralError::NoDataRows);
    }

    tracing::debug!(
        columns = headers.len(),
        rows = rows.len(),
        "Parsed import payload"
    );
    Ok(ParsedRows { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<ParsedRows, StructuralError> {
        parse_payload(text, &ImportConfig::default())
    }

    #[test]
    fn test_parse_simple() {
        let parsed = parse("a,b,c\n1,2,3\n4,5,6\n").unwrap();

        assert_eq!(parsed.headers, vec!["a", "b", "c"]);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.rows[0].line, 2);
        assert_eq!(parsed.rows[1].values, vec!["4", "5", "6"]);
    }

    #[test]
    fn test_parse_empty_payload() {
        assert_eq!(parse(""), Err(StructuralError::EmptyPayload));
        assert_eq!(parse("  \n\n "), Err(StructuralError::EmptyPayload));
    }

    #[test]
    fn test_parse_blank_header() {
        assert_eq!(parse(",,\n1,2,3\n"), Err(StructuralError::MissingHeader));
    }

    #[test]
    fn test_parse_header_only() {
        assert_eq!(parse("a,b,c\n"), Err(StructuralError::NoDataRows));
        assert_eq!(parse("a,b,c\n\n   \n"), Err(StructuralError::NoDataRows));
    }

    #[test]
    fn test_parse_blank_lines_keep_physical_numbering() {
        let parsed = parse("a,b\n1,2\n\n3,4\r\n").unwrap();

        let lines: Vec<u64> = parsed.rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn test_parse_quoted_field_with_delimiter() {
        let parsed = parse("a,b\n\"Pasto 1, norte\",2\n").unwrap();
        assert_eq!(parsed.rows[0].values, vec!["Pasto 1, norte", "2"]);
    }

    #[test]
    fn test_parse_naive_split_ignores_quotes() {
        let parsed = parse_payload("a,b\n\"x,y\",2\n", &ImportConfig::naive_split()).unwrap();
        assert_eq!(parsed.rows[0].values, vec!["\"x", "y\"", "2"]);
    }

    #[test]
    fn test_parse_trims_values() {
        let parsed = parse(" a , b \n 1 ,2 \n").unwrap();
        assert_eq!(parsed.headers, vec!["a", "b"]);
        assert_eq!(parsed.rows[0].values, vec!["1", "2"]);
    }
}
