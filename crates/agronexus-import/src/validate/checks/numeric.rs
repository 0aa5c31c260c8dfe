//! Numeric field checks (electronic tag, weight).

use super::super::issue::Issue;
use crate::record::ValidatedRecord;

/// Electronic tag, when present, must be all ASCII digits.
pub fn check_tag(record: &ValidatedRecord) -> Option<Issue> {
    let tag = record.electronic_tag.as_str();
    if tag.is_empty() || tag.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(Issue::NonNumericTag {
        value: tag.to_string(),
    })
}

/// Current weight, when present, must be a finite number.
pub fn check_weight(record: &ValidatedRecord) -> Option<Issue> {
    let weight = record.weight.as_str();
    if weight.is_empty() || parse_weight(weight).is_some() {
        return None;
    }
    Some(Issue::NonNumericWeight {
        value: weight.to_string(),
    })
}

/// Parse a weight in kg. Rejects NaN and infinities.
pub fn parse_weight(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("380"), Some(380.0));
        assert_eq!(parse_weight("412.5"), Some(412.5));
        assert_eq!(parse_weight("NaN"), None);
        assert_eq!(parse_weight("inf"), None);
        assert_eq!(parse_weight("380kg"), None);
        assert_eq!(parse_weight("380,5"), None);
    }
}
