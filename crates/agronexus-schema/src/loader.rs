//! CSV loaders for the catalog tables.

use std::io::Read;

use crate::error::{Result, SchemaError};
use crate::types::{BreedDefinition, CategoryDefinition, SpeciesDefinition};

/// Load the species table.
///
/// Required columns: `Code`, `Display Name`. The husbandry columns are optional.
pub fn load_species<R: Read>(reader: R, table: &str) -> Result<Vec<SpeciesDefinition>> {
    let mut reader = csv_reader(reader);
    let headers = read_headers(&mut reader, table)?;

    let code_idx = find_column(&headers, "Code", table)?;
    let name_idx = find_column(&headers, "Display Name", table)?;
    let weight_idx = headers.iter().position(|h| h == "Reference Weight (kg)");
    let gestation_idx = headers.iter().position(|h| h == "Gestation (days)");
    let breeding_idx = headers.iter().position(|h| h == "First Breeding (months)");

    let mut species = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| csv_error(table, source))?;
        let line = line_of(&record);

        let code = cell(&record, code_idx);
        if code.is_empty() {
            continue;
        }
        let display_name = match cell(&record, name_idx) {
            "" => code,
            name => name,
        };

        species.push(SpeciesDefinition {
            code: code.to_string(),
            display_name: display_name.to_string(),
            reference_weight_kg: parse_optional(&record, weight_idx, table, "weight", line)?,
            gestation_days: parse_optional(&record, gestation_idx, table, "gestation", line)?,
            first_breeding_months: parse_optional(
                &record,
                breeding_idx,
                table,
                "first breeding",
                line,
            )?,
        });
    }

    Ok(species)
}

/// Load the breeds table.
///
/// Required columns: `Species`, `Breed`. `Origin` is optional.
pub fn load_breeds<R: Read>(reader: R, table: &str) -> Result<Vec<BreedDefinition>> {
    let mut reader = csv_reader(reader);
    let headers = read_headers(&mut reader, table)?;

    let species_idx = find_column(&headers, "Species", table)?;
    let breed_idx = find_column(&headers, "Breed", table)?;
    let origin_idx = headers.iter().position(|h| h == "Origin");

    let mut breeds = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| csv_error(table, source))?;

        let species = cell(&record, species_idx);
        let name = cell(&record, breed_idx);
        if species.is_empty() && name.is_empty() {
            continue;
        }
        if species.is_empty() || name.is_empty() {
            return Err(SchemaError::InvalidValue {
                table: table.to_string(),
                field: (if species.is_empty() { "Species" } else { "Breed" }).to_string(),
                value: String::new(),
                line: line_of(&record),
            });
        }

        let origin = origin_idx
            .map(|idx| cell(&record, idx))
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        breeds.push(BreedDefinition {
            species: species.to_string(),
            name: name.to_string(),
            origin,
        });
    }

    Ok(breeds)
}

/// Load the categories table as `(species code, category)` pairs in file order.
///
/// Required columns: `Species`, `Code`, `Display Name`.
pub fn load_categories<R: Read>(
    reader: R,
    table: &str,
) -> Result<Vec<(String, CategoryDefinition)>> {
    let mut reader = csv_reader(reader);
    let headers = read_headers(&mut reader, table)?;

    let species_idx = find_column(&headers, "Species", table)?;
    let code_idx = find_column(&headers, "Code", table)?;
    let name_idx = find_column(&headers, "Display Name", table)?;

    let mut categories = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| csv_error(table, source))?;

        let species = cell(&record, species_idx);
        let code = cell(&record, code_idx);
        if species.is_empty() && code.is_empty() {
            continue;
        }
        if species.is_empty() || code.is_empty() {
            return Err(SchemaError::InvalidValue {
                table: table.to_string(),
                field: (if species.is_empty() { "Species" } else { "Code" }).to_string(),
                value: String::new(),
                line: line_of(&record),
            });
        }
        let display_name = match cell(&record, name_idx) {
            "" => code,
            name => name,
        };

        categories.push((
            species.to_string(),
            CategoryDefinition::new(code, display_name),
        ));
    }

    Ok(categories)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn read_headers<R: Read>(reader: &mut csv::Reader<R>, table: &str) -> Result<csv::StringRecord> {
    reader
        .headers()
        .cloned()
        .map_err(|source| csv_error(table, source))
}

fn find_column(headers: &csv::StringRecord, name: &str, table: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == name)
        .ok_or_else(|| SchemaError::MissingColumn {
            column: name.to_string(),
            table: table.to_string(),
        })
}

fn cell(record: &csv::StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

fn parse_optional<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: Option<usize>,
    table: &str,
    field: &str,
    line: u64,
) -> Result<Option<T>> {
    let Some(idx) = idx else {
        return Ok(None);
    };
    let value = cell(record, idx);
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| SchemaError::InvalidValue {
            table: table.to_string(),
            field: field.to_string(),
            value: value.to_string(),
            line,
        })
}

fn csv_error(table: &str, source: csv::Error) -> SchemaError {
    SchemaError::Csv {
        table: table.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_species_optional_columns() {
        let data = "Code,Display Name\nbufalo,Bubalino\n";
        let species = load_species(data.as_bytes(), "species").unwrap();

        assert_eq!(species.len(), 1);
        assert_eq!(species[0].code, "bufalo");
        assert_eq!(species[0].display_name, "Bubalino");
        assert!(species[0].gestation_days.is_none());
    }

    #[test]
    fn test_load_species_invalid_number() {
        let data = "Code,Display Name,Gestation (days)\nbovino,Bovino,muitos\n";
        let result = load_species(data.as_bytes(), "species");

        assert!(matches!(
            result,
            Err(SchemaError::InvalidValue { ref field, line: 2, .. }) if field == "gestation"
        ));
    }

    #[test]
    fn test_load_breeds_missing_column() {
        let data = "Species,Name\nbovino,Nelore\n";
        let result = load_breeds(data.as_bytes(), "breeds");

        assert!(matches!(
            result,
            Err(SchemaError::MissingColumn { ref column, .. }) if column == "Breed"
        ));
    }

    #[test]
    fn test_load_breeds_skips_blank_rows() {
        let data = "Species,Breed,Origin\nbovino,Nelore,Índia\n,,\novino,Texel,\n";
        let breeds = load_breeds(data.as_bytes(), "breeds").unwrap();

        assert_eq!(breeds.len(), 2);
        assert_eq!(breeds[0].origin.as_deref(), Some("Índia"));
        assert_eq!(breeds[1].origin, None);
    }

    #[test]
    fn test_load_categories_name_defaults_to_code() {
        let data = "Species,Code,Display Name\nbovino,boi,\n";
        let categories = load_categories(data.as_bytes(), "categories").unwrap();

        assert_eq!(categories[0].0, "bovino");
        assert_eq!(categories[0].1, CategoryDefinition::new("boi", "boi"));
    }
}
