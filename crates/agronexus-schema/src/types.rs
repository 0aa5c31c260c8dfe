//! Catalog entry types.

use serde::{Deserialize, Serialize};

/// A species the registry knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDefinition {
    /// Short code used in data files (e.g., "bovino").
    pub code: String,
    /// Human-readable name (e.g., "Bovino").
    pub display_name: String,
    /// Live weight of one animal unit for this species, in kg.
    pub reference_weight_kg: Option<f64>,
    /// Average gestation length in days.
    pub gestation_days: Option<u32>,
    /// Typical age at first breeding, in months.
    pub first_breeding_months: Option<u32>,
}

impl SpeciesDefinition {
    /// Creates a species with only its identity fields set.
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            reference_weight_kg: None,
            gestation_days: None,
            first_breeding_months: None,
        }
    }

    /// True when `value` names this species by code or display name.
    pub fn matches(&self, value: &str) -> bool {
        matches_ignore_case(&self.code, value) || matches_ignore_case(&self.display_name, value)
    }
}

/// A breed scoped to one species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedDefinition {
    pub species: String,
    pub name: String,
    pub origin: Option<String>,
}

impl BreedDefinition {
    /// "Name (origin)", or just the name when the origin is unknown.
    pub fn label(&self) -> String {
        match &self.origin {
            Some(origin) => format!("{} ({origin})", self.name),
            None => self.name.clone(),
        }
    }
}

/// A life-stage category scoped to one species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// Short code (e.g., "novilha").
    pub code: String,
    /// Display name (e.g., "Novilha").
    pub display_name: String,
}

impl CategoryDefinition {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
        }
    }

    /// Data files use either form interchangeably.
    pub fn matches(&self, value: &str) -> bool {
        matches_ignore_case(&self.code, value) || matches_ignore_case(&self.display_name, value)
    }

    /// "Display Name (code)", as shown in validation messages.
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name, self.code)
    }
}

/// Compares two catalog values, ignoring surrounding whitespace and case.
pub fn matches_ignore_case(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
