#![allow(missing_docs)]

use agronexus_import::export::write_csv;
use agronexus_import::{
    AnimalFilter, AnimalStore, ImportConfig, ImportCoordinator, RowValidator, Sex, StoreError,
    template_headers, template_payload,
};
use agronexus_schema::SchemaRegistry;
use chrono::NaiveDate;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
}

fn store_from(payload: &str) -> AnimalStore {
    let registry = SchemaRegistry::embedded().unwrap();
    let mut coordinator = ImportCoordinator::new(
        RowValidator::new(&registry).with_today(today()),
        ImportConfig::default(),
    );
    coordinator.load(payload).unwrap();

    let mut store = AnimalStore::new();
    let summary = coordinator.commit(&mut store).unwrap();
    assert!(summary.failed.is_empty(), "commit failures: {:?}", summary.failed);
    store
}

fn store_from_template() -> AnimalStore {
    store_from(&template_payload())
}

fn payload(rows: &[&str]) -> String {
    let mut out = template_headers().join(",");
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("herd").join("animals.json");
    let store = store_from_template();

    store.save(&path).unwrap();
    let loaded = AnimalStore::load(&path).unwrap();

    assert_eq!(loaded.animals(), store.animals());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_load_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = AnimalStore::load(&dir.path().join("absent.json")).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_load_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("animals.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(matches!(
        AnimalStore::load(&path),
        Err(StoreError::Json { .. })
    ));
}

#[test]
fn test_search_filters_are_conjunctive() {
    let store = store_from_template();

    let females = store.search(&AnimalFilter {
        sex: Some(Sex::Female),
        ..AnimalFilter::default()
    });
    assert_eq!(females.len(), 1);
    assert_eq!(females[0].identifier, "BOV001");

    let bulls_in_lot_a = store.search(&AnimalFilter {
        species: Some("Bovino".to_string()),
        lot: Some("Lote A".to_string()),
        sex: Some(Sex::Male),
        ..AnimalFilter::default()
    });
    assert!(bulls_in_lot_a.is_empty());

    assert_eq!(store.search(&AnimalFilter::default()).len(), 2);
}

#[test]
fn test_statistics() {
    let stats = store_from_template().statistics();

    assert_eq!(stats.total, 2);
    assert_eq!(stats.by_species.get("bovino"), Some(&2));
    assert_eq!(stats.by_sex.get("M"), Some(&1));
    assert_eq!(stats.by_sex.get("F"), Some(&1));
    assert_eq!(stats.by_category.get("touro"), Some(&1));
    assert_eq!(stats.by_lot.get("Reprodutores"), Some(&1));
}

#[test]
fn test_export_csv() {
    let store = store_from_template();
    let mut out = Vec::new();

    let written = write_csv(store.animals(), &mut out, today()).unwrap();
    assert_eq!(written, 2);

    let text = String::from_utf8(out).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r"
    Identificação,Nome,Sexo,Data de Nascimento,Idade,Espécie,Raça,Categoria,Status,Peso Atual (kg),Peso (@),Lote,Observações
    BOV001,Estrela da Manhã,Fêmea,15/03/2022,4 anos,bovino,Nelore,novilha,ativo,380,25.3,Lote A,Animal em boa condição
    BOV002,Touro Rex,Macho,10/01/2021,5 anos,bovino,Angus,touro,ativo,750,50.0,Reprodutores,Reprodutor principal
    ");
}

#[test]
fn test_row_without_weight_is_stored_and_exported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("animals.json");
    let store = store_from(&payload(&[
        "BOV001,,,bovino,Nelore,F,2022-03-15,novilha,,proprio,Lote A,Pasto 1,,,",
    ]));

    assert_eq!(store.len(), 1);
    let animal = store.find_by_identifier("BOV001").unwrap();
    assert_eq!(animal.weight_kg, None);

    store.save(&path).unwrap();
    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(!saved.contains("weight_kg"));
    let loaded = AnimalStore::load(&path).unwrap();
    assert_eq!(loaded.animals(), store.animals());

    let mut out = Vec::new();
    write_csv(loaded.animals(), &mut out, today()).unwrap();
    insta::assert_snapshot!(String::from_utf8(out).unwrap().trim_end(), @r"
    Identificação,Nome,Sexo,Data de Nascimento,Idade,Espécie,Raça,Categoria,Status,Peso Atual (kg),Peso (@),Lote,Observações
    BOV001,-,Fêmea,15/03/2022,4 anos,bovino,Nelore,novilha,ativo,-,-,Lote A,-
    ");
}

#[test]
fn test_display_and_code_spellings_group_together() {
    let store = store_from(&payload(&[
        "SUI001,,,Suíno,landrace,F,2025-11-02,Leitoa,,proprio,Maternidade,Baia 1,,,",
        "SUI002,,,suino,Landrace,F,2025-11-02,leitoa,,proprio,Maternidade,Baia 1,,,",
        "SUI003,,,SUINO,Duroc,M,2025-11-02,Leitão,,proprio,Maternidade,Baia 2,,,",
    ]));
    assert_eq!(store.len(), 3);

    let stats = store.statistics();
    assert_eq!(stats.by_species.get("suino"), Some(&3));
    assert_eq!(stats.by_species.len(), 1);
    assert_eq!(stats.by_category.get("leitoa"), Some(&2));
    assert_eq!(stats.by_category.get("leitao"), Some(&1));

    let sows = store.search(&AnimalFilter {
        species: Some("suino".to_string()),
        category: Some("leitoa".to_string()),
        ..AnimalFilter::default()
    });
    assert_eq!(sows.len(), 2);
    assert!(sows.iter().all(|a| a.breed == "Landrace"));
}
