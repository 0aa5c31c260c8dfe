use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use agronexus_import::{CommitSummary, HerdStatistics, ImportReport, Outcome};
use agronexus_schema::{BreedDefinition, Catalog, SchemaRegistry};

pub fn print_report(report: &ImportReport) {
    let counts = report.counts();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Valid"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(counts.total).add_attribute(Attribute::Bold),
        count_cell(counts.valid, Color::Green),
        count_cell(counts.errors, Color::Red),
        count_cell(counts.warnings, Color::Yellow),
    ]);
    println!("{table}");
    print_issue_table(report);
}

fn print_issue_table(report: &ImportReport) {
    let rejected: Vec<_> = report
        .records()
        .iter()
        .filter(|record| record.outcome != Outcome::Valid)
        .collect();
    if rejected.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Identifier"),
        header_cell("Field"),
        header_cell("Issue"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for record in rejected {
        for issue in &record.issues {
            table.add_row(vec![
                Cell::new(record.row_number).fg(Color::Blue),
                identifier_cell(&record.identifier),
                Cell::new(issue.field().column()),
                Cell::new(issue.to_string()),
            ]);
        }
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn print_commit_summary(summary: &CommitSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Committed"),
        header_cell("Failed"),
        header_cell("Skipped"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        count_cell(summary.committed, Color::Green),
        count_cell(summary.failed.len(), Color::Red),
        count_cell(summary.skipped, Color::Yellow),
    ]);
    println!("{table}");

    if !summary.failed.is_empty() {
        eprintln!("Rows not imported:");
        for failure in &summary.failed {
            eprintln!("- row {}: {}", failure.row_number, failure.reason);
        }
    }
    if summary.cancelled {
        eprintln!("Import cancelled; remaining rows were not committed.");
    }
}

pub fn print_species(registry: &SchemaRegistry) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Species"),
        header_cell("Ref. weight (kg)"),
        header_cell("Gestation (days)"),
        header_cell("Breeds"),
        header_cell("Categories"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for species in registry.list_species() {
        let categories: Vec<String> = registry
            .categories_for(&species.code)
            .iter()
            .map(|category| category.display_name.clone())
            .collect();
        let breeds: Vec<String> = registry
            .breed_details(&species.code)
            .iter()
            .map(BreedDefinition::label)
            .collect();
        table.add_row(vec![
            Cell::new(&species.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&species.display_name),
            optional_cell(species.reference_weight_kg),
            optional_cell(species.gestation_days),
            Cell::new(breeds.join(", ")),
            Cell::new(categories.join(", ")),
        ]);
    }
    println!("{table}");
}

pub fn print_statistics(stats: &HerdStatistics) {
    println!("Animals: {}", stats.total);
    for (title, counts) in [
        ("Species", &stats.by_species),
        ("Sex", &stats.by_sex),
        ("Category", &stats.by_category),
        ("Lot", &stats.by_lot),
    ] {
        if counts.is_empty() {
            continue;
        }
        println!();
        println!("{}", breakdown_table(title, counts));
    }
}

fn breakdown_table(title: &str, counts: &BTreeMap<String, usize>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(title), header_cell("Animals")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (key, count) in counts {
        table.add_row(vec![Cell::new(key), Cell::new(count)]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn identifier_cell(identifier: &str) -> Cell {
    if identifier.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(identifier)
    }
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
