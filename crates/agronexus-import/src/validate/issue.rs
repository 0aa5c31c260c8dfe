//! Row validation issue types.
//!
//! Each variant carries only the data its message needs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::AnimalField;

/// A single problem found on one import row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    // Presence checks
    /// Required field is blank or absent.
    RequiredMissing { field: AnimalField },

    // Enumeration checks
    /// Sex is not one of the accepted values.
    InvalidSex { value: String },
    /// Origin is not one of the accepted values.
    InvalidOrigin { value: String },

    // Format checks
    /// Electronic tag contains non-digit characters.
    NonNumericTag { value: String },
    /// Birth date could not be parsed.
    UnparseableBirthDate { value: String },
    /// Birth date is after today.
    FutureBirthDate { value: String },
    /// Current weight is not a number.
    NonNumericWeight { value: String },

    // Catalog checks
    /// Species is not in the catalog.
    UnknownSpecies { value: String, valid: Vec<String> },
    /// Breed does not belong to the species.
    InvalidBreed {
        breed: String,
        species: String,
        valid: Vec<String>,
    },
    /// Category does not belong to the species. `valid` holds "Name (code)" labels.
    InvalidCategory {
        category: String,
        species: String,
        valid: Vec<String>,
    },
}

impl Issue {
    /// Stable identifier for the issue class.
    pub fn code(&self) -> &'static str {
        match self {
            Issue::RequiredMissing { .. } => "missing-required-field",
            Issue::InvalidSex { .. } | Issue::InvalidOrigin { .. } => "invalid-enumeration-value",
            Issue::NonNumericTag { .. } => "non-numeric-tag",
            Issue::UnparseableBirthDate { .. } => "unparseable-birth-date",
            Issue::FutureBirthDate { .. } => "future-birth-date",
            Issue::NonNumericWeight { .. } => "non-numeric-weight",
            Issue::UnknownSpecies { .. } => "unknown-species",
            Issue::InvalidBreed { .. } => "invalid-breed-for-species",
            Issue::InvalidCategory { .. } => "invalid-category-for-species",
        }
    }

    /// Field the issue is about.
    pub fn field(&self) -> AnimalField {
        match self {
            Issue::RequiredMissing { field } => *field,
            Issue::InvalidSex { .. } => AnimalField::Sex,
            Issue::InvalidOrigin { .. } => AnimalField::Origin,
            Issue::NonNumericTag { .. } => AnimalField::ElectronicTag,
            Issue::UnparseableBirthDate { .. } | Issue::FutureBirthDate { .. } => {
                AnimalField::BirthDate
            }
            Issue::NonNumericWeight { .. } => AnimalField::Weight,
            Issue::UnknownSpecies { .. } => AnimalField::Species,
            Issue::InvalidBreed { .. } => AnimalField::Breed,
            Issue::InvalidCategory { .. } => AnimalField::Category,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::RequiredMissing { field } => write!(f, "{} is required", field.label()),
            Issue::InvalidSex { value } => {
                write!(f, "Invalid sex '{value}'. Use M, F, Macho or Fêmea")
            }
            Issue::InvalidOrigin { value } => write!(
                f,
                "Invalid origin '{value}'. Valid origins: proprio, compra, leilao, doacao, parceria"
            ),
            Issue::NonNumericTag { value } => {
                write!(f, "Electronic tag '{value}' must contain only digits")
            }
            Issue::UnparseableBirthDate { value } => {
                write!(f, "Invalid birth date '{value}' (use YYYY-MM-DD)")
            }
            Issue::FutureBirthDate { value } => {
                write!(f, "Birth date {value} cannot be in the future")
            }
            Issue::NonNumericWeight { value } => {
                write!(f, "Current weight '{value}' must be a number")
            }
            Issue::UnknownSpecies { value, valid } => write!(
                f,
                "Invalid species '{value}'. Valid species: {}",
                valid.join(", ")
            ),
            Issue::InvalidBreed {
                breed,
                species,
                valid,
            } => write!(
                f,
                "Breed '{breed}' is not valid for {species}. Valid breeds: {}",
                valid.join(", ")
            ),
            Issue::InvalidCategory {
                category,
                species,
                valid,
            } => write!(
                f,
                "Category '{category}' is not valid for {species}. Valid categories: {}",
                valid.join(", ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_message() {
        let issue = Issue::RequiredMissing {
            field: AnimalField::Lot,
        };
        assert_eq!(issue.to_string(), "Current lot is required");
        assert_eq!(issue.field(), AnimalField::Lot);
        assert_eq!(issue.code(), "missing-required-field");
    }

    #[test]
    fn test_category_message_lists_labels() {
        let issue = Issue::InvalidCategory {
            category: "cabra".to_string(),
            species: "Bovino".to_string(),
            valid: vec!["Bezerro (bezerro)".to_string(), "Vaca (vaca)".to_string()],
        };
        insta::assert_snapshot!(
            issue.to_string(),
            @"Category 'cabra' is not valid for Bovino. Valid categories: Bezerro (bezerro), Vaca (vaca)"
        );
    }

    #[test]
    fn test_issue_serializes_with_kind_tag() {
        let issue = Issue::NonNumericWeight {
            value: "pesado".to_string(),
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "non_numeric_weight");
        assert_eq!(json["value"], "pesado");
    }
}
