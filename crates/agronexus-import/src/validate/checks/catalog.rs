//! Species, breed, and category checks against the catalog.

use agronexus_schema::Catalog;

use super::super::issue::Issue;
use crate::record::ValidatedRecord;

/// Unknown species skips the breed and category checks.
pub fn check(record: &ValidatedRecord, catalog: &dyn Catalog) -> Vec<Issue> {
    let mut issues = Vec::new();
    if record.species.is_empty() {
        return issues;
    }

    let Some(species) = catalog.find_species(&record.species) else {
        issues.push(Issue::UnknownSpecies {
            value: record.species.clone(),
            valid: catalog
                .list_species()
                .iter()
                .map(|s| s.code.clone())
                .collect(),
        });
        return issues;
    };

    if !record.breed.is_empty() && !catalog.is_valid_breed(&species.code, &record.breed) {
        issues.push(Issue::InvalidBreed {
            breed: record.breed.clone(),
            species: species.display_name.clone(),
            valid: catalog
                .breeds_for(&species.code)
                .into_iter()
                .map(str::to_string)
                .collect(),
        });
    }

    if !record.category.is_empty() && !catalog.is_valid_category(&species.code, &record.category)
    {
        issues.push(Issue::InvalidCategory {
            category: record.category.clone(),
            species: species.display_name.clone(),
            valid: catalog
                .categories_for(&species.code)
                .iter()
                .map(agronexus_schema::CategoryDefinition::label)
                .collect(),
        });
    }

    issues
}
