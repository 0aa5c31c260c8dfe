#![allow(missing_docs)]

use agronexus_import::{AnimalField, Issue, Outcome, RawRecord, RowValidator, ValidatedRecord};
use agronexus_schema::SchemaRegistry;
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
}

fn valid_row() -> RawRecord {
    RawRecord::default()
        .with(AnimalField::Identifier, "BOV001")
        .with(AnimalField::Species, "bovino")
        .with(AnimalField::Breed, "Nelore")
        .with(AnimalField::Sex, "F")
        .with(AnimalField::BirthDate, "2022-03-15")
        .with(AnimalField::Category, "novilha")
        .with(AnimalField::Origin, "proprio")
        .with(AnimalField::Lot, "Lote A")
        .with(AnimalField::Pasture, "Pasto 1")
}

fn validate(raw: &RawRecord) -> ValidatedRecord {
    let registry = SchemaRegistry::embedded().unwrap();
    RowValidator::new(&registry)
        .with_today(today())
        .validate(raw, 2)
}

#[test]
fn test_valid_row() {
    let record = validate(&valid_row());

    assert_eq!(record.outcome, Outcome::Valid);
    assert!(record.issues.is_empty());
    assert_eq!(record.row_number, 2);
    assert_eq!(record.identifier, "BOV001");
}

#[test]
fn test_unknown_species_skips_dependent_checks() {
    let raw = valid_row()
        .with(AnimalField::Species, "camelo")
        .with(AnimalField::Breed, "Poodle")
        .with(AnimalField::Category, "nada");
    let record = validate(&raw);

    assert_eq!(record.outcome, Outcome::Error);
    assert_eq!(record.issues.len(), 1);
    let message = record.issues[0].to_string();
    assert!(message.contains("camelo"));
    assert_eq!(
        message,
        "Invalid species 'camelo'. Valid species: bovino, caprino, ovino, equino, suino"
    );
}

#[test]
fn test_invalid_breed_for_species() {
    let record = validate(&valid_row().with(AnimalField::Breed, "Poodle"));

    assert_eq!(record.issues.len(), 1);
    let Issue::InvalidBreed {
        breed,
        species,
        valid,
    } = &record.issues[0]
    else {
        panic!("expected invalid breed, got {:?}", record.issues[0]);
    };
    assert_eq!(breed, "Poodle");
    assert_eq!(species, "Bovino");
    assert_eq!(&valid[..3], &["Nelore", "Angus", "Brahman"]);
    assert!(
        record.issues[0]
            .to_string()
            .starts_with("Breed 'Poodle' is not valid for Bovino. Valid breeds: Nelore, Angus, Brahman")
    );
}

#[test]
fn test_invalid_category_lists_labels() {
    let record = validate(&valid_row().with(AnimalField::Category, "cabra"));

    assert_eq!(record.issues.len(), 1);
    let message = record.issues[0].to_string();
    assert!(message.starts_with("Category 'cabra' is not valid for Bovino"));
    assert!(message.contains("Novilha (novilha)"));
}

#[test]
fn test_future_birth_date() {
    let record = validate(&valid_row().with(AnimalField::BirthDate, "2027-10-15"));

    assert_eq!(
        record.issues,
        vec![Issue::FutureBirthDate {
            value: "2027-10-15".to_string()
        }]
    );
    assert_eq!(record.outcome, Outcome::Error);
}

#[test]
fn test_birth_date_today_is_not_future() {
    let record = validate(&valid_row().with(AnimalField::BirthDate, "2026-10-15"));
    assert!(record.is_valid());
}

#[test]
fn test_unparseable_birth_date_is_distinct() {
    let record = validate(&valid_row().with(AnimalField::BirthDate, "15/03/2022"));

    assert_eq!(
        record.issues,
        vec![Issue::UnparseableBirthDate {
            value: "15/03/2022".to_string()
        }]
    );
}

#[test]
fn test_empty_row_reports_every_required_field() {
    let record = validate(&RawRecord::default());

    assert_eq!(record.outcome, Outcome::Error);
    let missing: Vec<AnimalField> = record
        .issues
        .iter()
        .filter_map(|issue| match issue {
            Issue::RequiredMissing { field } => Some(*field),
            _ => None,
        })
        .collect();
    assert_eq!(missing, AnimalField::REQUIRED);
    assert_eq!(record.issues.len(), 8);
}

#[test]
fn test_all_checks_run() {
    let raw = valid_row()
        .with(AnimalField::Sex, "X")
        .with(AnimalField::Origin, "roubado")
        .with(AnimalField::ElectronicTag, "98A")
        .with(AnimalField::Weight, "pesado");
    let record = validate(&raw);

    let codes: Vec<&str> = record.issues.iter().map(Issue::code).collect();
    assert_eq!(
        codes,
        vec![
            "invalid-enumeration-value",
            "invalid-enumeration-value",
            "non-numeric-tag",
            "non-numeric-weight",
        ]
    );
}

#[test]
fn test_accepts_display_values() {
    let raw = valid_row()
        .with(AnimalField::Sex, "Macho")
        .with(AnimalField::Category, "Touro")
        .with(AnimalField::Origin, "Leilão")
        .with(AnimalField::Species, "BOVINO")
        .with(AnimalField::Weight, "512.4")
        .with(AnimalField::ElectronicTag, "982000123456789");
    let record = validate(&raw);

    assert!(record.is_valid(), "unexpected issues: {:?}", record.messages());
}

#[test]
fn test_catalog_values_stored_canonically() {
    let raw = valid_row()
        .with(AnimalField::Identifier, "CAP001")
        .with(AnimalField::Species, "Caprino")
        .with(AnimalField::Breed, "boer")
        .with(AnimalField::Sex, "M")
        .with(AnimalField::Category, "Bode Jovem");
    let record = validate(&raw);

    assert!(record.is_valid(), "unexpected issues: {:?}", record.messages());
    assert_eq!(record.species, "caprino");
    assert_eq!(record.breed, "Boer");
    assert_eq!(record.category, "bode_jovem");
}

#[test]
fn test_unknown_catalog_values_left_as_typed() {
    let raw = valid_row()
        .with(AnimalField::Breed, "Poodle")
        .with(AnimalField::Category, "Vaca Louca");
    let record = validate(&raw);

    assert_eq!(record.outcome, Outcome::Error);
    assert_eq!(record.species, "bovino");
    assert_eq!(record.breed, "Poodle");
    assert_eq!(record.category, "Vaca Louca");
}

#[test]
fn test_messages_snapshot() {
    let raw = valid_row()
        .with(AnimalField::Identifier, "")
        .with(AnimalField::Sex, "macho");
    let record = validate(&raw);

    insta::assert_snapshot!(
        record.messages().join("\n"),
        @r"
    Unique identifier is required
    Invalid sex 'macho'. Use M, F, Macho or Fêmea
    "
    );
}
