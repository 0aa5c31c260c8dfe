//! Raw and validated animal rows.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validate::Issue;

/// Columns of the animal import layout, in template order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalField {
    Identifier,
    RegistryName,
    ElectronicTag,
    Species,
    Breed,
    Sex,
    BirthDate,
    Category,
    Weight,
    Origin,
    Lot,
    Pasture,
    Sire,
    Dam,
    Notes,
}

impl AnimalField {
    /// Every field, in template column order.
    pub const ALL: [AnimalField; 15] = [
        AnimalField::Identifier,
        AnimalField::RegistryName,
        AnimalField::ElectronicTag,
        AnimalField::Species,
        AnimalField::Breed,
        AnimalField::Sex,
        AnimalField::BirthDate,
        AnimalField::Category,
        AnimalField::Weight,
        AnimalField::Origin,
        AnimalField::Lot,
        AnimalField::Pasture,
        AnimalField::Sire,
        AnimalField::Dam,
        AnimalField::Notes,
    ];

    /// Fields that must be non-blank, in check order.
    pub const REQUIRED: [AnimalField; 8] = [
        AnimalField::Identifier,
        AnimalField::Species,
        AnimalField::Sex,
        AnimalField::BirthDate,
        AnimalField::Category,
        AnimalField::Origin,
        AnimalField::Lot,
        AnimalField::Pasture,
    ];

    /// Column name in import payloads.
    pub fn column(self) -> &'static str {
        match self {
            Self::Identifier => "identificacao_unica",
            Self::RegistryName => "nome_registro",
            Self::ElectronicTag => "brinco_eletronico",
            Self::Species => "especie",
            Self::Breed => "raca",
            Self::Sex => "sexo",
            Self::BirthDate => "data_nascimento",
            Self::Category => "categoria",
            Self::Weight => "peso_atual",
            Self::Origin => "origem",
            Self::Lot => "lote_atual",
            Self::Pasture => "pasto",
            Self::Sire => "pai",
            Self::Dam => "mae",
            Self::Notes => "observacoes",
        }
    }

    /// Human-readable label used in issue messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Identifier => "Unique identifier",
            Self::RegistryName => "Registry name",
            Self::ElectronicTag => "Electronic tag",
            Self::Species => "Species",
            Self::Breed => "Breed",
            Self::Sex => "Sex",
            Self::BirthDate => "Birth date",
            Self::Category => "Category",
            Self::Weight => "Current weight",
            Self::Origin => "Origin",
            Self::Lot => "Current lot",
            Self::Pasture => "Pasture",
            Self::Sire => "Sire",
            Self::Dam => "Dam",
            Self::Notes => "Notes",
        }
    }

    /// Look up a field by payload column name.
    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == column.trim())
    }
}

impl fmt::Display for AnimalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One data line zipped against the header row.
///
/// Exists only for the duration of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    values: HashMap<String, String>,
}

impl RawRecord {
    /// Zip header columns with line values. Missing trailing values become
    /// empty strings; surplus values are dropped.
    pub fn from_row(headers: &[String], values: &[String]) -> Self {
        let values = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = values.get(idx).cloned().unwrap_or_default();
                (header.clone(), value)
            })
            .collect();
        Self { values }
    }

    /// Value of a column, or "" when absent.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map_or("", String::as_str)
    }

    pub fn field(&self, field: AnimalField) -> &str {
        self.get(field.column())
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert) keyed by field.
    #[must_use]
    pub fn with(mut self, field: AnimalField, value: impl Into<String>) -> Self {
        self.insert(field.column(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Validation outcome of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Valid,
    Error,
    /// Reserved. No rule currently produces it.
    Warning,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row after validation.
///
/// All field values are kept as raw (trimmed) strings; absent columns are empty.
/// `outcome` is [`Outcome::Valid`] exactly when `issues` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedRecord {
    /// 1-based line in the payload; the header is row 1.
    pub row_number: u64,
    pub identifier: String,
    pub registry_name: String,
    pub electronic_tag: String,
    pub species: String,
    pub breed: String,
    pub sex: String,
    pub birth_date: String,
    pub category: String,
    pub weight: String,
    pub origin: String,
    pub lot: String,
    pub pasture: String,
    pub sire: String,
    pub dam: String,
    pub notes: String,
    pub outcome: Outcome,
    pub issues: Vec<Issue>,
}

impl ValidatedRecord {
    /// Copy field values out of a raw record. Outcome starts as valid with no issues.
    pub(crate) fn from_raw(raw: &RawRecord, row_number: u64) -> Self {
        let value = |field: AnimalField| raw.field(field).trim().to_string();
        Self {
            row_number,
            identifier: value(AnimalField::Identifier),
            registry_name: value(AnimalField::RegistryName),
            electronic_tag: value(AnimalField::ElectronicTag),
            species: value(AnimalField::Species),
            breed: value(AnimalField::Breed),
            sex: value(AnimalField::Sex),
            birth_date: value(AnimalField::BirthDate),
            category: value(AnimalField::Category),
            weight: value(AnimalField::Weight),
            origin: value(AnimalField::Origin),
            lot: value(AnimalField::Lot),
            pasture: value(AnimalField::Pasture),
            sire: value(AnimalField::Sire),
            dam: value(AnimalField::Dam),
            notes: value(AnimalField::Notes),
            outcome: Outcome::Valid,
            issues: Vec::new(),
        }
    }

    pub fn value(&self, field: AnimalField) -> &str {
        match field {
            AnimalField::Identifier => &self.identifier,
            AnimalField::RegistryName => &self.registry_name,
            AnimalField::ElectronicTag => &self.electronic_tag,
            AnimalField::Species => &self.species,
            AnimalField::Breed => &self.breed,
            AnimalField::Sex => &self.sex,
            AnimalField::BirthDate => &self.birth_date,
            AnimalField::Category => &self.category,
            AnimalField::Weight => &self.weight,
            AnimalField::Origin => &self.origin,
            AnimalField::Lot => &self.lot,
            AnimalField::Pasture => &self.pasture,
            AnimalField::Sire => &self.sire,
            AnimalField::Dam => &self.dam,
            AnimalField::Notes => &self.notes,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.outcome == Outcome::Valid
    }

    /// Issue messages in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}
