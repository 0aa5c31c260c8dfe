//! Catalog abstraction consumed by record validation.

use crate::types::{CategoryDefinition, SpeciesDefinition};

/// Read-only species/breed/category lookup.
///
/// Every lookup accepts a species by code or display name. Unknown species
/// yield empty results, never errors.
pub trait Catalog {
    /// All species, in catalog order.
    fn list_species(&self) -> &[SpeciesDefinition];

    /// Breed names for a species, in catalog order.
    fn breeds_for(&self, species: &str) -> Vec<&str>;

    /// Categories for a species, in display order.
    fn categories_for(&self, species: &str) -> &[CategoryDefinition];

    /// Find a species by code or display name.
    fn find_species(&self, value: &str) -> Option<&SpeciesDefinition> {
        self.list_species().iter().find(|s| s.matches(value))
    }

    /// Find a category of a species by code or display name.
    fn find_category(&self, species: &str, value: &str) -> Option<&CategoryDefinition> {
        self.categories_for(species).iter().find(|c| c.matches(value))
    }

    fn is_valid_breed(&self, species: &str, breed: &str) -> bool {
        self.breeds_for(species)
            .into_iter()
            .any(|name| crate::matches_ignore_case(name, breed))
    }

    fn is_valid_category(&self, species: &str, category: &str) -> bool {
        self.find_category(species, category).is_some()
    }
}
