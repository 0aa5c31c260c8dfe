//! In-memory herd store with JSON persistence.
//!
//! [`AnimalStore`] is the [`RecordSink`] the CLI commits into. Each accepted
//! record becomes an [`AnimalRecord`] with a generated id.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::animal::{Origin, Sex};
use crate::error::{SinkError, StoreError};
use crate::record::ValidatedRecord;
use crate::sink::RecordSink;
use crate::validate::{parse_birth_date, parse_weight};

/// Status assigned to newly imported animals.
pub const STATUS_ACTIVE: &str = "ativo";

/// A committed animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub id: String,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electronic_tag: Option<String>,
    pub species: String,
    pub breed: String,
    pub sex: Sex,
    pub birth_date: NaiveDate,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    pub origin: Origin,
    pub lot: String,
    pub pasture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sire: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dam: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub imported: bool,
}

impl AnimalRecord {
    /// Build a typed animal from a valid record.
    pub fn from_validated(
        record: &ValidatedRecord,
        id: String,
        created_at: DateTime<Utc>,
    ) -> Result<Self, SinkError> {
        if !record.is_valid() {
            return Err(SinkError::Rejected {
                reason: format!("row {} has validation errors", record.row_number),
            });
        }

        let rejected = |what: &str, value: &str| SinkError::Rejected {
            reason: format!("row {}: unreadable {what} '{value}'", record.row_number),
        };
        let sex = Sex::parse(&record.sex).ok_or_else(|| rejected("sex", &record.sex))?;
        let origin =
            Origin::parse(&record.origin).ok_or_else(|| rejected("origin", &record.origin))?;
        let birth_date = parse_birth_date(&record.birth_date)
            .ok_or_else(|| rejected("birth date", &record.birth_date))?;
        let weight_kg = match non_empty(&record.weight) {
            Some(weight) => {
                Some(parse_weight(&weight).ok_or_else(|| rejected("weight", &record.weight))?)
            }
            None => None,
        };

        Ok(Self {
            id,
            identifier: record.identifier.clone(),
            registry_name: non_empty(&record.registry_name),
            electronic_tag: non_empty(&record.electronic_tag),
            species: record.species.clone(),
            breed: record.breed.clone(),
            sex,
            birth_date,
            category: record.category.clone(),
            weight_kg,
            origin,
            lot: record.lot.clone(),
            pasture: record.pasture.clone(),
            sire: non_empty(&record.sire),
            dam: non_empty(&record.dam),
            notes: non_empty(&record.notes),
            status: STATUS_ACTIVE.to_string(),
            created_at,
            imported: true,
        })
    }
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + use<> {
    let path = path.to_path_buf();
    move |source| StoreError::Write { path, source }
}

/// Trailing counter of an `animal_<millis>_<seq>` id.
fn id_sequence(id: &str) -> Option<u64> {
    id.strip_prefix("animal_")?.rsplit('_').next()?.parse().ok()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Search criteria. Unset fields match everything; set fields must all match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimalFilter {
    pub species: Option<String>,
    pub sex: Option<Sex>,
    pub category: Option<String>,
    pub lot: Option<String>,
    pub status: Option<String>,
}

impl AnimalFilter {
    pub fn matches(&self, animal: &AnimalRecord) -> bool {
        fn eq(filter: Option<&String>, value: &str) -> bool {
            filter.is_none_or(|f| agronexus_schema::matches_ignore_case(f, value))
        }

        eq(self.species.as_ref(), &animal.species)
            && self.sex.is_none_or(|sex| sex == animal.sex)
            && eq(self.category.as_ref(), &animal.category)
            && eq(self.lot.as_ref(), &animal.lot)
            && eq(self.status.as_ref(), &animal.status)
    }
}

/// Herd counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HerdStatistics {
    pub total: usize,
    pub by_species: BTreeMap<String, usize>,
    pub by_sex: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub by_lot: BTreeMap<String, usize>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    animals: Vec<AnimalRecord>,
}

/// Animals in insertion order.
#[derive(Debug, Default)]
pub struct AnimalStore {
    animals: Vec<AnimalRecord>,
    next_seq: u64,
}

impl AnimalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store file. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Store file not found, starting empty");
            return Ok(Self::new());
        }

        let text = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: StoreFile = serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let next_seq = file
            .animals
            .iter()
            .filter_map(|a| id_sequence(&a.id))
            .max()
            .unwrap_or(0)
            .max(file.animals.len() as u64);

        tracing::info!(path = %path.display(), animals = file.animals.len(), "Loaded store");
        Ok(Self {
            animals: file.animals,
            next_seq,
        })
    }

    /// Write the store as pretty JSON via a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error(parent))?;
        }

        let file = StoreFile {
            animals: self.animals.clone(),
        };
        let json = serde_json::to_vec_pretty(&file).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let temp_path = path.with_extension("json.tmp");
        let mut out = File::create(&temp_path).map_err(write_error(&temp_path))?;
        out.write_all(&json).map_err(write_error(&temp_path))?;
        out.sync_all().map_err(write_error(&temp_path))?;
        fs::rename(&temp_path, path).map_err(write_error(path))?;

        tracing::info!(path = %path.display(), animals = self.animals.len(), "Saved store");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    pub fn animals(&self) -> &[AnimalRecord] {
        &self.animals
    }

    pub fn get(&self, id: &str) -> Option<&AnimalRecord> {
        self.animals.iter().find(|a| a.id == id)
    }

    pub fn find_by_identifier(&self, identifier: &str) -> Option<&AnimalRecord> {
        self.animals
            .iter()
            .find(|a| a.identifier.eq_ignore_ascii_case(identifier.trim()))
    }

    /// Remove an animal by id, returning it.
    pub fn remove(&mut self, id: &str) -> Option<AnimalRecord> {
        let idx = self.animals.iter().position(|a| a.id == id)?;
        Some(self.animals.remove(idx))
    }

    pub fn clear(&mut self) {
        self.animals.clear();
    }

    pub fn search(&self, filter: &AnimalFilter) -> Vec<&AnimalRecord> {
        self.animals.iter().filter(|a| filter.matches(a)).collect()
    }

    pub fn statistics(&self) -> HerdStatistics {
        let mut stats = HerdStatistics {
            total: self.animals.len(),
            ..HerdStatistics::default()
        };
        for animal in &self.animals {
            *stats.by_species.entry(animal.species.to_lowercase()).or_default() += 1;
            *stats.by_sex.entry(animal.sex.code().to_string()).or_default() += 1;
            *stats.by_category.entry(animal.category.to_lowercase()).or_default() += 1;
            *stats.by_lot.entry(animal.lot.clone()).or_default() += 1;
        }
        stats
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        self.next_seq += 1;
        format!("animal_{}_{}", now.timestamp_millis(), self.next_seq)
    }
}

impl RecordSink for AnimalStore {
    fn add(&mut self, record: &ValidatedRecord) -> Result<String, SinkError> {
        if self.find_by_identifier(&record.identifier).is_some() {
            return Err(SinkError::Duplicate {
                identifier: record.identifier.clone(),
            });
        }

        let now = Utc::now();
        let id = self.next_id(now);
        let animal = AnimalRecord::from_validated(record, id.clone(), now)?;
        self.animals.push(animal);
        Ok(id)
    }
}
