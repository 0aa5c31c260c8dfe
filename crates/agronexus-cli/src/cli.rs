//! CLI argument definitions for the AgroNexus importer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "agronexus",
    version,
    about = "AgroNexus bulk animal import",
    long_about = "Validate spreadsheet exports of animal records and import them into a herd store.\n\n\
                  Rows are checked against the species, breed, and category catalog; only\n\
                  valid rows are committed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include animal identifiers and field values in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the import template (header plus example rows).
    Template(TemplateArgs),

    /// List catalog species with their breeds and categories.
    Species(CatalogArgs),

    /// Validate an import file without committing anything.
    Check(CheckArgs),

    /// Validate an import file and commit its valid rows to a store.
    Import(ImportArgs),

    /// Export a store as a herd report CSV.
    Export(ExportArgs),

    /// Print herd statistics for a store.
    Stats(StoreArgs),
}

#[derive(Args)]
pub struct TemplateArgs {
    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Directory holding species.csv, breeds.csv, and categories.csv
    /// (default: built-in catalog).
    #[arg(long = "catalog", value_name = "DIR")]
    pub catalog: Option<PathBuf>,
}

#[derive(Args)]
pub struct PayloadArgs {
    /// Import file (CSV).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Field delimiter.
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",")]
    pub delimiter: char,

    /// Split lines on every delimiter, ignoring double quotes.
    #[arg(long = "no-quoting")]
    pub no_quoting: bool,

    /// Row number to drop before commit (repeatable).
    #[arg(long = "discard", value_name = "ROW")]
    pub discard: Vec<u64>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,

    /// Store file (JSON). Created when missing.
    #[arg(long = "store", value_name = "PATH")]
    pub store: PathBuf,

    /// Validate and report without committing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct StoreArgs {
    /// Store file (JSON).
    #[arg(long = "store", value_name = "PATH")]
    pub store: PathBuf,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only animals of this species.
    #[arg(long = "species")]
    pub species: Option<String>,

    /// Only animals in this lot.
    #[arg(long = "lot")]
    pub lot: Option<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
