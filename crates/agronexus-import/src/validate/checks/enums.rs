//! Enumerated value checks (sex, origin).
//!
//! Blank values are left to the required checks.

use super::super::issue::Issue;
use crate::animal::{Origin, Sex};
use crate::record::ValidatedRecord;

pub fn check(record: &ValidatedRecord) -> Vec<Issue> {
    let mut issues = Vec::new();

    if !record.sex.is_empty() && Sex::parse(&record.sex).is_none() {
        issues.push(Issue::InvalidSex {
            value: record.sex.clone(),
        });
    }

    if !record.origin.is_empty() && Origin::parse(&record.origin).is_none() {
        issues.push(Issue::InvalidOrigin {
            value: record.origin.clone(),
        });
    }

    issues
}
