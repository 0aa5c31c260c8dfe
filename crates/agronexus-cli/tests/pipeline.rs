//! Integration tests for the pipeline module.

use std::fs;

use agronexus_cli::pipeline::{
    commit_to_store, export_store, import_config, load_catalog, read_payload, review,
};
use agronexus_import::{
    AnimalFilter, AnimalStore, ImportConfig, ImportCoordinator, ImportPhase, RowValidator,
    template_payload,
};
use chrono::NaiveDate;
use tempfile::TempDir;

const HEADER: &str = "identificacao_unica,nome_registro,brinco_eletronico,especie,raca,sexo,data_nascimento,categoria,peso_atual,origem,lote_atual,pasto,pai,mae,observacoes";

fn mixed_payload() -> String {
    [
        HEADER,
        "BOV001,,,bovino,Nelore,F,2022-03-15,novilha,380,proprio,Lote A,Pasto 1,,,",
        "BOV002,,,bovino,Poodle,M,2021-01-10,touro,,compra,Lote A,Pasto 1,,,",
        ",,,bovino,Angus,M,2021-01-10,touro,,compra,Lote B,Pasto 2,,,",
    ]
    .join("\n")
}

#[test]
fn test_import_config_rejects_bad_delimiter() {
    assert_eq!(import_config(';', true).unwrap().delimiter, b';');
    assert!(!import_config(',', false).unwrap().quoting);
    assert!(import_config('ç', true).is_err());
    assert!(import_config('"', true).is_err());
}

#[test]
fn test_read_payload_enforces_size_limit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("animais.csv");
    fs::write(&path, mixed_payload()).unwrap();

    assert!(read_payload(&path, &ImportConfig::default()).is_ok());

    let tiny = ImportConfig::default().with_max_file_size(10);
    let error = read_payload(&path, &tiny).unwrap_err();
    assert!(format!("{error:#}").contains("limit is 10 bytes"));
}

#[test]
fn test_review_discards_requested_rows() {
    let registry = load_catalog(None).unwrap();
    let mut coordinator = ImportCoordinator::new(RowValidator::new(&registry), ImportConfig::default());

    let counts = review(&mut coordinator, &mixed_payload(), &[4, 99]).unwrap();
    assert_eq!(counts.total, 2);
    assert_eq!(counts.valid, 1);
    assert_eq!(counts.errors, 1);
    assert_eq!(coordinator.phase(), ImportPhase::Validation);
}

#[test]
fn test_review_reports_structural_error() {
    let registry = load_catalog(None).unwrap();
    let mut coordinator = ImportCoordinator::new(RowValidator::new(&registry), ImportConfig::default());

    let error = review(&mut coordinator, HEADER, &[]).unwrap_err();
    assert!(format!("{error:#}").contains("no data rows"));
    assert_eq!(coordinator.phase(), ImportPhase::Upload);
}

#[test]
fn test_commit_then_export() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("animals.json");
    let registry = load_catalog(None).unwrap();

    let mut coordinator = ImportCoordinator::new(RowValidator::new(&registry), ImportConfig::default());
    review(&mut coordinator, &template_payload(), &[]).unwrap();
    let summary = commit_to_store(&mut coordinator, &store_path).unwrap();
    assert_eq!(summary.committed, 2);
    assert_eq!(AnimalStore::load(&store_path).unwrap().len(), 2);

    let filter = AnimalFilter {
        lot: Some("Lote A".to_string()),
        ..AnimalFilter::default()
    };
    let mut out = Vec::new();
    let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    let written = export_store(&store_path, &filter, &mut out, today).unwrap();
    assert_eq!(written, 1);

    let text = String::from_utf8(out).unwrap();
    assert!(text.lines().nth(1).unwrap().starts_with("BOV001,Estrela da Manhã,Fêmea,15/03/2022"));
}

#[test]
fn test_failed_rows_do_not_block_save() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("animals.json");
    let registry = load_catalog(None).unwrap();

    let mut first = ImportCoordinator::new(RowValidator::new(&registry), ImportConfig::default());
    review(&mut first, &template_payload(), &[]).unwrap();
    commit_to_store(&mut first, &store_path).unwrap();

    // BOV001 is already stored; the new row still goes in
    let payload = [
        HEADER,
        "BOV001,,,bovino,Nelore,F,2022-03-15,novilha,,proprio,Lote A,Pasto 1,,,",
        "BOV003,,,caprino,Boer,M,2023-05-01,bode,,leilao,Lote C,Pasto 3,,,",
    ]
    .join("\n");
    let mut second = ImportCoordinator::new(RowValidator::new(&registry), ImportConfig::default());
    review(&mut second, &payload, &[]).unwrap();
    let summary = commit_to_store(&mut second, &store_path).unwrap();

    assert_eq!(summary.committed, 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].row_number, 2);
    assert_eq!(AnimalStore::load(&store_path).unwrap().len(), 3);
}

#[test]
fn test_load_catalog_missing_dir() {
    let dir = TempDir::new().unwrap();
    let error = load_catalog(Some(&dir.path().join("nowhere"))).unwrap_err();
    assert!(format!("{error:#}").contains("load catalog"));
}
