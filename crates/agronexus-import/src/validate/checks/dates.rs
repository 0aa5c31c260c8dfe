//! Birth date checks.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::super::issue::Issue;
use crate::record::ValidatedRecord;

/// Unparseable and future dates are distinct issues; at most one is reported.
pub fn check(record: &ValidatedRecord, today: NaiveDate) -> Option<Issue> {
    let value = record.birth_date.as_str();
    if value.is_empty() {
        return None;
    }

    match parse_birth_date(value) {
        None => Some(Issue::UnparseableBirthDate {
            value: value.to_string(),
        }),
        Some(date) if date > today => Some(Issue::FutureBirthDate {
            value: value.to_string(),
        }),
        Some(_) => None,
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339, and `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|datetime| datetime.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_birth_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2022, 3, 15);
        assert_eq!(parse_birth_date("2022-03-15"), expected);
        assert_eq!(parse_birth_date("2022-03-15T08:30:00Z"), expected);
        assert_eq!(parse_birth_date("2022-03-15T08:30:00"), expected);
        assert_eq!(parse_birth_date("15/03/2022"), None);
        assert_eq!(parse_birth_date("2022-02-30"), None);
    }
}
