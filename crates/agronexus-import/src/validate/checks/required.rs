//! Required field checks.

use super::super::issue::Issue;
use crate::record::{AnimalField, ValidatedRecord};

/// One issue per blank required field.
pub fn check(record: &ValidatedRecord) -> Vec<Issue> {
    AnimalField::REQUIRED
        .into_iter()
        .filter(|field| record.value(*field).trim().is_empty())
        .map(|field| Issue::RequiredMissing { field })
        .collect()
}
