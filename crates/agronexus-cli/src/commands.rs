use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info_span;

use agronexus_import::{
    AnimalFilter, AnimalStore, ImportCoordinator, ProgressPhase, RowValidator, template_payload,
};

use agronexus_cli::pipeline::{
    commit_to_store, export_store, import_config, load_catalog, read_payload, review,
};

use crate::cli::{
    CatalogArgs, CheckArgs, ExportArgs, ImportArgs, PayloadArgs, StoreArgs, TemplateArgs,
};
use crate::summary::{print_commit_summary, print_report, print_species, print_statistics};

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    let payload = template_payload();
    match &args.output {
        Some(path) => {
            fs::write(path, payload)
                .with_context(|| format!("write template {}", path.display()))?;
            println!("Template written to {}", path.display());
        }
        None => io::stdout()
            .write_all(payload.as_bytes())
            .context("write template")?,
    }
    Ok(())
}

pub fn run_species(args: &CatalogArgs) -> Result<()> {
    let registry = load_catalog(args.catalog.as_deref())?;
    print_species(&registry);
    Ok(())
}

/// Returns whether any row failed validation.
pub fn run_check(args: &CheckArgs) -> Result<bool> {
    let payload = &args.payload;
    let _span = info_span!("check", file = %payload.file.display()).entered();

    let registry = load_catalog(payload.catalog.catalog.as_deref())?;
    let config = import_config(payload.delimiter, !payload.no_quoting)?;
    let text = read_payload(&payload.file, &config)?;

    let mut coordinator = ImportCoordinator::new(RowValidator::new(&registry), config);
    let counts = review(&mut coordinator, &text, &payload.discard)?;
    if let Some(report) = coordinator.report() {
        print_report(report);
    }
    Ok(counts.errors > 0)
}

/// Returns whether any row failed validation or commit.
pub fn run_import(args: &ImportArgs) -> Result<bool> {
    let payload: &PayloadArgs = &args.payload;
    let _span = info_span!("import", file = %payload.file.display()).entered();

    let registry = load_catalog(payload.catalog.catalog.as_deref())?;
    let config = import_config(payload.delimiter, !payload.no_quoting)?;
    let text = read_payload(&payload.file, &config)?;

    let bar = commit_progress_bar();
    let observer_bar = bar.clone();
    let mut coordinator = ImportCoordinator::new(RowValidator::new(&registry), config)
        .with_observer(move |progress| {
            if progress.phase == ProgressPhase::Committing {
                observer_bar.set_length(progress.total as u64);
                observer_bar.set_position(progress.completed as u64);
            }
        });

    let counts = review(&mut coordinator, &text, &payload.discard)?;
    if let Some(report) = coordinator.report() {
        print_report(report);
    }

    if args.dry_run {
        bar.finish_and_clear();
        println!("Dry run: {} valid rows would be imported.", counts.valid);
        return Ok(counts.errors > 0);
    }

    bar.enable_steady_tick(Duration::from_millis(80));
    let summary = commit_to_store(&mut coordinator, &args.store);
    bar.finish_and_clear();
    let summary = summary?;
    print_commit_summary(&summary);
    println!("Store: {}", args.store.display());
    Ok(counts.errors > 0 || summary.has_failures())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let filter = AnimalFilter {
        species: args.species.clone(),
        lot: args.lot.clone(),
        ..AnimalFilter::default()
    };
    let today = Local::now().date_naive();

    let written = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create export file {}", path.display()))?;
            let written = export_store(&args.store.store, &filter, BufWriter::new(file), today)?;
            println!("Exported {written} animals to {}", path.display());
            written
        }
        None => export_store(&args.store.store, &filter, io::stdout().lock(), today)?,
    };
    tracing::debug!(rows = written, "Export finished");
    Ok(())
}

pub fn run_stats(args: &StoreArgs) -> Result<()> {
    let store = open_store(&args.store)?;
    print_statistics(&store.statistics());
    Ok(())
}

fn open_store(path: &Path) -> Result<AnimalStore> {
    AnimalStore::load(path).with_context(|| format!("open store {}", path.display()))
}

fn commit_progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} committing [{bar:30}] {pos}/{len} rows")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
