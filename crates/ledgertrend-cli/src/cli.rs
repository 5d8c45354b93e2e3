//! CLI argument definitions for ledgertrend.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `init`  | Write a configuration template and exit |
//! | `run`   | Run the aggregation and indicator pipeline |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--config` | `ledgertrend.json` | Configuration file path |
//! | `--format` | `json` | Report output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--quiet` | `false` | Suppress progress output on stderr |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Sales ledger aggregation and moving-average pipeline.
///
/// Reads a raw sales ledger from a local DuckDB warehouse, aggregates it
/// into daily, weekly, and monthly series, computes SMA/WMA/EMA columns per
/// configured window, and writes the enriched series back to destination
/// tables.
#[derive(Debug, Parser)]
#[command(name = "ledgertrend", version, about = "Sales ledger moving-average pipeline")]
pub struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, global = true, default_value = "ledgertrend.json")]
    pub config: PathBuf,

    /// Report output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Suppress per-stage progress output on stderr.
    #[arg(long, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a configuration template and exit.
    Init,
    /// Run the full pipeline against the configured warehouse.
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Override the warehouse database file path from the configuration.
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}
