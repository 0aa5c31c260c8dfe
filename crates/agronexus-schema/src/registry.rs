//! Schema registry built from the catalog tables.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::path::Path;

use crate::embedded;
use crate::error::{Result, SchemaError};
use crate::loader::{load_breeds, load_categories, load_species};
use crate::traits::Catalog;
use crate::types::{BreedDefinition, CategoryDefinition, SpeciesDefinition, matches_ignore_case};

/// File name of the species table inside a catalog directory.
pub const SPECIES_FILE: &str = "species.csv";
/// File name of the breeds table inside a catalog directory.
pub const BREEDS_FILE: &str = "breeds.csv";
/// File name of the categories table inside a catalog directory.
pub const CATEGORIES_FILE: &str = "categories.csv";

/// Immutable species → breeds → categories registry.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    species: Vec<SpeciesDefinition>,
    /// Keyed by species code.
    breeds: BTreeMap<String, Vec<BreedDefinition>>,
    /// Keyed by species code.
    categories: BTreeMap<String, Vec<CategoryDefinition>>,
}

impl SchemaRegistry {
    /// Build the registry from the compiled-in tables.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded data is inconsistent.
    pub fn embedded() -> Result<Self> {
        let species = load_species(embedded::SPECIES_CSV.as_bytes(), SPECIES_FILE)?;
        let breeds = load_breeds(embedded::BREEDS_CSV.as_bytes(), BREEDS_FILE)?;
        let categories = load_categories(embedded::CATEGORIES_CSV.as_bytes(), CATEGORIES_FILE)?;
        Self::from_parts(species, breeds, categories)
    }

    /// Build the registry from `species.csv`, `breeds.csv`, and
    /// `categories.csv` inside `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let species = load_species(open(&dir.join(SPECIES_FILE))?, SPECIES_FILE)?;
        let breeds = load_breeds(open(&dir.join(BREEDS_FILE))?, BREEDS_FILE)?;
        let categories = load_categories(open(&dir.join(CATEGORIES_FILE))?, CATEGORIES_FILE)?;
        let registry = Self::from_parts(species, breeds, categories)?;

        tracing::info!(
            catalog = %dir.display(),
            species = registry.species.len(),
            "Loaded livestock catalog"
        );
        Ok(registry)
    }

    /// Assemble a registry, checking cross-table consistency.
    ///
    /// Breed and category rows are attached to their species by code or
    /// display name and stored under the species code.
    pub fn from_parts(
        species: Vec<SpeciesDefinition>,
        breeds: Vec<BreedDefinition>,
        categories: Vec<(String, CategoryDefinition)>,
    ) -> Result<Self> {
        if species.is_empty() {
            return Err(SchemaError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for definition in &species {
            if !seen.insert(definition.code.to_lowercase()) {
                return Err(SchemaError::DuplicateSpecies {
                    code: definition.code.clone(),
                });
            }
        }

        let resolve = |table: &str, value: &str| -> Result<String> {
            species
                .iter()
                .find(|s| s.matches(value))
                .map(|s| s.code.clone())
                .ok_or_else(|| SchemaError::UnknownSpecies {
                    table: table.to_string(),
                    species: value.to_string(),
                })
        };

        let mut breed_map: BTreeMap<String, Vec<BreedDefinition>> = BTreeMap::new();
        for mut breed in breeds {
            let code = resolve(BREEDS_FILE, &breed.species)?;
            let entries = breed_map.entry(code.clone()).or_default();
            if entries.iter().any(|b| matches_ignore_case(&b.name, &breed.name)) {
                return Err(SchemaError::Duplicate {
                    kind: "breed",
                    species: code,
                    value: breed.name,
                });
            }
            breed.species = code;
            entries.push(breed);
        }

        let mut category_map: BTreeMap<String, Vec<CategoryDefinition>> = BTreeMap::new();
        for (species_value, category) in categories {
            let code = resolve(CATEGORIES_FILE, &species_value)?;
            let entries = category_map.entry(code.clone()).or_default();
            if entries.iter().any(|c| matches_ignore_case(&c.code, &category.code)) {
                return Err(SchemaError::Duplicate {
                    kind: "category",
                    species: code,
                    value: category.code,
                });
            }
            entries.push(category);
        }

        Ok(Self {
            species,
            breeds: breed_map,
            categories: category_map,
        })
    }

    /// Full breed entries (with origin) for a species.
    pub fn breed_details(&self, species: &str) -> &[BreedDefinition] {
        self.find_species(species)
            .and_then(|s| self.breeds.get(&s.code))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Species codes, in catalog order.
    pub fn species_codes(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.code.as_str()).collect()
    }
}

impl Catalog for SchemaRegistry {
    fn list_species(&self) -> &[SpeciesDefinition] {
        &self.species
    }

    fn breeds_for(&self, species: &str) -> Vec<&str> {
        self.breed_details(species)
            .iter()
            .map(|b| b.name.as_str())
            .collect()
    }

    fn categories_for(&self, species: &str) -> &[CategoryDefinition] {
        self.find_species(species)
            .and_then(|s| self.categories.get(&s.code))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SchemaError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SchemaError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(code: &str, name: &str) -> SpeciesDefinition {
        SpeciesDefinition::new(code, name)
    }

    fn breed(species: &str, name: &str) -> BreedDefinition {
        BreedDefinition {
            species: species.to_string(),
            name: name.to_string(),
            origin: None,
        }
    }

    #[test]
    fn test_from_parts_rejects_empty_catalog() {
        let result = SchemaRegistry::from_parts(vec![], vec![], vec![]);
        assert!(matches!(result, Err(SchemaError::EmptyCatalog)));
    }

    #[test]
    fn test_from_parts_rejects_duplicate_species() {
        let result = SchemaRegistry::from_parts(
            vec![species("bovino", "Bovino"), species("BOVINO", "Boi")],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(SchemaError::DuplicateSpecies { .. })));
    }

    #[test]
    fn test_from_parts_rejects_orphan_breed() {
        let result = SchemaRegistry::from_parts(
            vec![species("bovino", "Bovino")],
            vec![breed("camelo", "Bactriano")],
            vec![],
        );
        assert!(matches!(
            result,
            Err(SchemaError::UnknownSpecies { ref species, .. }) if species == "camelo"
        ));
    }

    #[test]
    fn test_from_parts_rejects_duplicate_breed() {
        let result = SchemaRegistry::from_parts(
            vec![species("bovino", "Bovino")],
            vec![breed("bovino", "Nelore"), breed("Bovino", "nelore")],
            vec![],
        );
        assert!(matches!(
            result,
            Err(SchemaError::Duplicate { kind: "breed", .. })
        ));
    }

    #[test]
    fn test_rows_attached_by_display_name() {
        let registry = SchemaRegistry::from_parts(
            vec![species("suino", "Suíno")],
            vec![breed("Suíno", "Piau")],
            vec![("Suíno".to_string(), CategoryDefinition::new("porca", "Porca"))],
        )
        .unwrap();

        assert_eq!(registry.breeds_for("suino"), vec!["Piau"]);
        assert_eq!(registry.breed_details("suino")[0].species, "suino");
        assert_eq!(registry.categories_for("suino").len(), 1);
    }
}
