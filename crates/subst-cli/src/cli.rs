//! Command-line arguments of the `subst` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "subst",
    version,
    about = "Find in-stock substitutes for out-of-stock items",
    long_about = "Match a shortage table against an inventory catalog.\n\n\
                  Each shortage item gets at most one substitute sharing its `cur` code:\n\
                  the smallest lot that covers the shortage, or the largest lot available."
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

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow item codes and other row values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve each shortage to its best substitute.
    Resolve(ResolveArgs),

    /// List the normalized columns of a table.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Shortage table (CSV, XLSX, XLS or ODS).
    #[arg(long, value_name = "PATH")]
    pub shortages: Option<PathBuf>,

    /// Sheet of the shortage workbook (default: first sheet).
    #[arg(long = "shortages-sheet", value_name = "NAME")]
    pub shortages_sheet: Option<String>,

    /// Inventory catalog (CSV, XLSX, XLS or ODS).
    #[arg(long, value_name = "PATH")]
    pub inventory: Option<PathBuf>,

    /// Sheet of the inventory workbook (default: first sheet).
    #[arg(long = "inventory-sheet", value_name = "NAME")]
    pub inventory_sheet: Option<String>,

    /// Extra column to carry into the result (repeatable).
    #[arg(long = "extra-column", value_name = "NAME")]
    pub extra_columns: Vec<String>,

    /// Only consider candidates from this warehouse (repeatable).
    #[arg(long = "warehouse", value_name = "ID")]
    pub warehouses: Vec<String>,

    /// Also write the result to this file (`.json` for JSON, CSV otherwise).
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML file with table locations and resolve options.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Table to inspect.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Sheet of the workbook (default: first sheet).
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,
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
