//! Command-line interface definitions for dupescan.
//!
//! All arguments are defined with the clap derive API. The binary is a
//! single-purpose scanner, so there are no subcommands.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory, print result tables
//! dupescan ~/Downloads
//!
//! # Only consider csv/txt files at least 5 MB in size
//! dupescan ~/data --ext csv --ext txt --min-size-mb 5
//!
//! # Parallel hashing, JSON output for scripting
//! dupescan ~/data --workers 8 --output json
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Content-addressed duplicate file and directory finder.
///
/// dupescan hashes every file under a root directory (BLAKE3) and reports
/// groups of byte-identical files as well as directories whose entire
/// content matches, regardless of file naming.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Minimum file size in MB for reported file groups (0 reports all)
    #[arg(long, value_name = "MB", default_value_t = 0.0, value_parser = parse_threshold)]
    pub min_size_mb: f64,

    /// Only consider files with this extension (repeatable, no leading
    /// dot, case-insensitive). Disables directory-duplicate detection.
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Number of hashing workers (1 = strictly sequential)
    #[arg(short, long, value_name = "N", default_value_t = 1, env = "DUPESCAN_WORKERS")]
    pub workers: usize,

    /// Skip unreadable files with a warning instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress bars and all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// Full report plus summary as JSON
    Json,
    /// One CSV row per duplicate-file member
    Csv,
}

/// Parse and validate the size threshold argument.
fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("size threshold must be >= 0, got {value}"));
    }
    Ok(value)
}
