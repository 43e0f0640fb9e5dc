//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{CallCategory, Shift};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// QADash - call-center QA performance dashboard
///
/// Filter synthetic or CSV-backed call records by date range, shift,
/// category and agent, then render KPIs and five chart views as a
/// Markdown, JSON or HTML report.
///
/// Examples:
///   qadash
///   qadash --shift night --category cancellation --format html -o night.html
///   qadash --data calls.csv --from 2024-03-01 --to 2024-03-31
///   qadash --agent "Laura Rios" -o -
///   qadash --export-csv calls.csv
///   qadash --list-options
///   qadash --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// CSV file with call records
    ///
    /// When omitted, a synthetic table is generated.
    #[arg(short, long, value_name = "FILE", env = "QADASH_DATA")]
    pub data: Option<PathBuf>,

    /// Seed for the synthetic generator
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Number of synthetic records to generate
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// First date to include (YYYY-MM-DD, inclusive)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD, inclusive)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Only include one shift
    #[arg(long, value_enum)]
    pub shift: Option<Shift>,

    /// Only include one call category
    #[arg(long, value_enum)]
    pub category: Option<CallCategory>,

    /// Only include one agent (display name or agent id)
    #[arg(long, value_name = "NAME|ID")]
    pub agent: Option<String>,

    /// Output format (markdown, json, html)
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Output file path for the report; `-` writes to stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the full source table to this CSV file
    #[arg(long, value_name = "FILE")]
    pub export_csv: Option<PathBuf>,

    /// Print the values available to each filter and exit
    #[arg(long)]
    pub list_options: bool,

    /// Clamp out-of-range scores in the CSV instead of rejecting the file
    #[arg(long)]
    pub clamp: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .qadash.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .qadash.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
    /// Self-contained HTML page with SVG charts
    Html,
}

impl OutputFormat {
    /// File extension used for the default output path.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.rows == Some(0) {
            return Err("Rows must be at least 1".to_string());
        }

        if self.data.is_some() && (self.seed.is_some() || self.rows.is_some()) {
            return Err("--seed and --rows only apply to synthetic data, not --data".to_string());
        }

        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(format!("--from {} is after --to {}", from, to));
            }
        }

        // Validate data file if provided
        if let Some(ref path) = self.data {
            if !path.exists() {
                return Err(format!("Data file does not exist: {}", path.display()));
            }
            if !path.is_file() {
                return Err(format!("Data path is not a file: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
