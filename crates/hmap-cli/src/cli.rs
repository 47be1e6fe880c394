//! CLI argument definitions for the header mapper.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "header-mapper",
    version,
    about = "Map spreadsheet headers onto a canonical column schema",
    long_about = "Map spreadsheet headers onto a canonical column schema.\n\n\
                  Reads every sheet of a workbook, detects multi-row headers and\n\
                  matches each header by exact name, alias and fuzzy similarity.\n\
                  Results are written as JSON next to the input file."
)]
pub struct Cli {
    /// Workbook to process (.xlsx, .xlsm, .xlsb, .xls or .ods).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory holding the canonical schema JSON files.
    #[arg(long = "schema-dir", value_name = "DIR", default_value = "aliases")]
    pub schema_dir: PathBuf,

    /// TOML file with matching thresholds.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum fuzzy score (0-100) a candidate needs to count as a match.
    ///
    /// Defaults to 20, or to the value in --config when one is given.
    #[arg(long = "fuzzy-min", value_name = "SCORE")]
    pub fuzzy_min: Option<u32>,

    /// Output JSON path (default: <INPUT stem>_mapping_result.json next to INPUT).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Attach up to N ranked alternative matches to every header.
    #[arg(long = "candidates", value_name = "N", default_value_t = 0)]
    pub candidates: usize,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
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
