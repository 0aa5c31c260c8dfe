//! Individual row checks.
//!
//! Every check runs on every row; issues are concatenated in the order below.

pub mod catalog;
pub mod dates;
pub mod enums;
pub mod numeric;
pub mod required;

use agronexus_schema::Catalog;
use chrono::NaiveDate;

use super::issue::Issue;
use crate::record::ValidatedRecord;

/// Run all checks against one record.
pub fn run_all(record: &ValidatedRecord, catalog: &dyn Catalog, today: NaiveDate) -> Vec<Issue> {
    let mut issues = required::check(record);
    issues.extend(enums::check(record));
    issues.extend(numeric::check_tag(record));
    issues.extend(catalog::check(record, catalog));
    issues.extend(dates::check(record, today));
    issues.extend(numeric::check_weight(record));
    issues
}
