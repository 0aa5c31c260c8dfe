//! Herd report export as CSV.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::Result;
use crate::store::AnimalRecord;

/// Column headers of the herd report.
pub const EXPORT_HEADERS: [&str; 13] = [
    "Identificação",
    "Nome",
    "Sexo",
    "Data de Nascimento",
    "Idade",
    "Espécie",
    "Raça",
    "Categoria",
    "Status",
    "Peso Atual (kg)",
    "Peso (@)",
    "Lote",
    "Observações",
];

/// Kilograms per arroba.
const KG_PER_ARROBA: f64 = 15.0;

const MISSING: &str = "-";

/// Age as shown in reports: days under a month, months under a year, else years.
pub fn age_label(birth_date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - birth_date).num_days().max(0);
    if days < 30 {
        format!("{days} dias")
    } else if days < 365 {
        format!("{} meses", days / 30)
    } else {
        format!("{} anos", days / 365)
    }
}

fn or_missing(value: &str) -> String {
    if value.trim().is_empty() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}

fn report_row(animal: &AnimalRecord, today: NaiveDate) -> [String; 13] {
    let weight = animal.weight_kg;
    [
        animal.identifier.clone(),
        or_missing(animal.registry_name.as_deref().unwrap_or_default()),
        animal.sex.label().to_string(),
        animal.birth_date.format("%d/%m/%Y").to_string(),
        age_label(animal.birth_date, today),
        or_missing(&animal.species),
        or_missing(&animal.breed),
        or_missing(&animal.category),
        or_missing(&animal.status),
        weight.map_or_else(|| MISSING.to_string(), |kg| kg.to_string()),
        weight.map_or_else(|| MISSING.to_string(), |kg| format!("{:.1}", kg / KG_PER_ARROBA)),
        or_missing(&animal.lot),
        or_missing(animal.notes.as_deref().unwrap_or_default()),
    ]
}

/// Write `animals` as a herd report to `writer`. Ages are computed against `today`.
pub fn write_csv<'a, W: Write>(
    animals: impl IntoIterator<Item = &'a AnimalRecord>,
    writer: W,
    today: NaiveDate,
) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EXPORT_HEADERS)?;

    let mut written = 0;
    for animal in animals {
        csv.write_record(report_row(animal, today))?;
        written += 1;
    }
    csv.flush().map_err(csv::Error::from)?;

    tracing::debug!(rows = written, "Wrote herd report");
    Ok(written)
}
