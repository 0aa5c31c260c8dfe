//! Per-row validation of animal records.

pub mod checks;
mod issue;

use agronexus_schema::Catalog;
use chrono::{Local, NaiveDate};

pub use checks::dates::parse_birth_date;
pub use checks::numeric::parse_weight;
pub use issue::Issue;

use crate::record::{Outcome, RawRecord, ValidatedRecord};

/// Validates raw rows against the field rules and an injected catalog.
///
/// Validation never fails: every problem becomes an [`Issue`] on the returned
/// record, and all checks run even after the first problem is found.
#[derive(Clone, Copy)]
pub struct RowValidator<'a> {
    catalog: &'a dyn Catalog,
    today: NaiveDate,
}

impl<'a> RowValidator<'a> {
    /// Validator comparing birth dates against the local date.
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self {
            catalog,
            today: Local::now().date_naive(),
        }
    }

    /// Override "today" for the future-date check.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn catalog(&self) -> &'a dyn Catalog {
        self.catalog
    }

    /// Validate one row. `row_number` is the 1-based payload line.
    pub fn validate(&self, raw: &RawRecord, row_number: u64) -> ValidatedRecord {
        let mut record = ValidatedRecord::from_raw(raw, row_number);
        record.issues = checks::run_all(&record, self.catalog, self.today);
        self.canonicalize(&mut record);
        record.outcome = if record.issues.is_empty() {
            Outcome::Valid
        } else {
            Outcome::Error
        };

        tracing::trace!(
            row = row_number,
            outcome = %record.outcome,
            issues = record.issues.len(),
            "Validated row"
        );
        record
    }

    /// Rewrite catalog values to their stored spelling: species and category
    /// codes, breed names as listed. Unmatched values are left as typed.
    fn canonicalize(&self, record: &mut ValidatedRecord) {
        let Some(species) = self.catalog.find_species(&record.species) else {
            return;
        };
        if let Some(category) = self.catalog.find_category(&species.code, &record.category) {
            record.category.clone_from(&category.code);
        }
        if let Some(breed) = self
            .catalog
            .breeds_for(&species.code)
            .into_iter()
            .find(|name| agronexus_schema::matches_ignore_case(name, &record.breed))
        {
            record.breed = breed.to_string();
        }
        record.species.clone_from(&species.code);
    }
}

impl std::fmt::Debug for RowValidator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowValidator")
            .field("species", &self.catalog.list_species().len())
            .field("today", &self.today)
            .finish()
    }
}
