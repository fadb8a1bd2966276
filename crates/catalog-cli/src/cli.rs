//! CLI argument definitions for the catalog migration.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "catalog-migrate",
    version,
    about = "Migrate the library book catalog to the new schema",
    long_about = "Recode language and subarea codes into names, derive loan status from open\n\
                  loans, and normalize whitespace. The migrated catalog is written only when\n\
                  every consistency check passes."
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

    /// Allow row-level catalog values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the migration over a book export and a loan export.
    Run(RunArgs),

    /// Print the language and subarea dictionaries.
    Dictionaries,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Book catalog export (CSV).
    #[arg(long = "books", value_name = "CSV")]
    pub books: PathBuf,

    /// Loan export (CSV).
    #[arg(long = "loans", value_name = "CSV")]
    pub loans: PathBuf,

    /// Migrated catalog destination (default: books_migrated.csv next to --books).
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Write a JSON validation report, whatever the verdict.
    #[arg(long = "report", value_name = "JSON")]
    pub report: Option<PathBuf>,

    /// Run every stage and the checks without writing the migrated catalog.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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
