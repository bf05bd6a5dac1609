//! CLI argument definitions for the beneficiary importer.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use relief_model::EntityKind;
use relief_report::ReportFormat;

#[derive(Parser)]
#[command(
    name = "relief-import",
    version,
    about = "Bulk spreadsheet import for aid beneficiary records",
    long_about = "Validate spreadsheet exports of children, orphans, wives and medical cases.\n\n\
                  Rows are checked against the entity's rules and the supplied guardian and\n\
                  martyr collections. Valid rows are written as JSON records; every problem\n\
                  is listed in a row-addressable error report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow beneficiary values (names, national IDs) to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a spreadsheet export and write records and an error report.
    Import(ImportArgs),

    /// Write a blank import template for an entity.
    Template(TemplateArgs),

    /// List importable entities and their columns.
    Entities,

    /// Search guardians by name.
    Suggest(SuggestArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Entity type the rows describe.
    #[arg(long = "entity", value_enum)]
    pub entity: EntityArg,

    /// Rows to import (.csv or .json).
    #[arg(value_name = "ROWS")]
    pub rows: PathBuf,

    /// Guardian collection (JSON array).
    #[arg(long = "guardians", value_name = "FILE")]
    pub guardians: Option<PathBuf>,

    /// Martyr collection (JSON array).
    #[arg(long = "martyrs", value_name = "FILE")]
    pub martyrs: Option<PathBuf>,

    /// Records already stored for this entity, checked for duplicates.
    #[arg(long = "existing", value_name = "FILE")]
    pub existing: Option<PathBuf>,

    /// Date ages are computed at (default: today).
    #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
    pub as_of: Option<NaiveDate>,

    /// Also reject rows that repeat an earlier row of the same file.
    #[arg(long = "check-batch-duplicates")]
    pub check_batch_duplicates: bool,

    /// Write the error report to this file.
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Error report format.
    #[arg(long = "report-format", value_enum, default_value = "csv")]
    pub report_format: ReportFormatArg,

    /// Write accepted records as JSON to this file.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the guardian collection with post-import counter updates applied.
    #[arg(long = "updated-guardians", value_name = "FILE")]
    pub updated_guardians: Option<PathBuf>,

    /// Exit with status 2 when any row is rejected.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Parser)]
pub struct TemplateArgs {
    #[arg(long = "entity", value_enum)]
    pub entity: EntityArg,

    /// Write the template here instead of stdout.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SuggestArgs {
    /// Guardian collection (JSON array).
    #[arg(long = "guardians", value_name = "FILE")]
    pub guardians: PathBuf,

    /// Part of a guardian's name.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of matches.
    #[arg(long = "limit", default_value_t = 10)]
    pub limit: usize,
}

/// CLI entity choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum EntityArg {
    Children,
    Orphans,
    Wives,
    MedicalCases,
}

impl From<EntityArg> for EntityKind {
    fn from(value: EntityArg) -> Self {
        match value {
            EntityArg::Children => EntityKind::Children,
            EntityArg::Orphans => EntityKind::Orphans,
            EntityArg::Wives => EntityKind::Wives,
            EntityArg::MedicalCases => EntityKind::MedicalCases,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Csv,
    Json,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(value: ReportFormatArg) -> Self {
        match value {
            ReportFormatArg::Csv => ReportFormat::Csv,
            ReportFormatArg::Json => ReportFormat::Json,
        }
    }
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
