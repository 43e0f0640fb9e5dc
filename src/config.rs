//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.qadash.toml` files.

use crate::cli::{Args, OutputFormat};
use crate::filter::Filter;
use crate::models::{CallCategory, Shift};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".qadash.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Data source settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Default filter selection.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Report output path. Defaults to `qadash_report.<ext>`.
    #[serde(default)]
    pub output: Option<String>,

    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl GeneralConfig {
    /// Output path, falling back to a name derived from the format.
    pub fn effective_output(&self) -> PathBuf {
        match self.output {
            Some(ref output) => PathBuf::from(output),
            None => PathBuf::from(format!("qadash_report.{}", self.format.extension())),
        }
    }
}

/// Where records come from and how they are generated or validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV file to load. Synthetic data is generated when unset.
    #[serde(default)]
    pub csv: Option<PathBuf>,

    /// Generator seed.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of generated records.
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// First date generated records can fall on.
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Number of days generated dates are spread over.
    #[serde(default = "default_span_days")]
    pub span_days: u32,

    /// Clamp out-of-range CSV scores instead of rejecting the file.
    #[serde(default)]
    pub clamp_out_of_range: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv: None,
            seed: default_seed(),
            rows: default_rows(),
            start_date: default_start_date(),
            span_days: default_span_days(),
            clamp_out_of_range: false,
        }
    }
}

fn default_seed() -> u64 {
    42
}

fn default_rows() -> usize {
    600
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_span_days() -> u32 {
    365
}

/// Filter selection applied when the CLI does not give one.
///
/// Shift and category accept any spelling the CSV loader accepts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FiltersConfig {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub shift: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub agent: Option<String>,
}

impl FiltersConfig {
    /// Parse into a [`Filter`].
    pub fn to_filter(&self) -> Result<Filter> {
        let shift = self
            .shift
            .as_deref()
            .map(str::parse::<Shift>)
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("Invalid [filters].shift")?;
        let category = self
            .category
            .as_deref()
            .map(str::parse::<CallCategory>)
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("Invalid [filters].category")?;

        Ok(Filter {
            from: self.from,
            to: self.to,
            shift,
            category,
            agent: self.agent.clone(),
        })
    }
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report heading.
    #[serde(default = "default_title")]
    pub title: String,

    /// SVG chart width in pixels.
    #[serde(default = "default_chart_width")]
    pub chart_width: u32,

    /// SVG chart height in pixels.
    #[serde(default = "default_chart_height")]
    pub chart_height: u32,

    /// Page and chart background colour.
    #[serde(default = "default_background")]
    pub background: String,

    /// Text and axis colour.
    #[serde(default = "default_foreground")]
    pub foreground: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            chart_width: default_chart_width(),
            chart_height: default_chart_height(),
            background: default_background(),
            foreground: default_foreground(),
        }
    }
}

fn default_title() -> String {
    "QA Call Center Performance Dashboard".to_string()
}

fn default_chart_width() -> u32 {
    760
}

fn default_chart_height() -> u32 {
    320
}

fn default_background() -> String {
    "#0e1117".to_string()
}

fn default_foreground() -> String {
    "#fafafa".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when given explicitly.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref output) = args.output {
            self.general.output = Some(output.to_string_lossy().into_owned());
        }
        if let Some(format) = args.format {
            self.general.format = format;
        }
        if args.verbose {
            self.general.verbose = true;
        }

        if let Some(ref data) = args.data {
            self.data.csv = Some(data.clone());
        }
        if let Some(seed) = args.seed {
            self.data.seed = seed;
        }
        if let Some(rows) = args.rows {
            self.data.rows = rows;
        }
        if args.clamp {
            self.data.clamp_out_of_range = true;
        }

        if args.from.is_some() {
            self.filters.from = args.from;
        }
        if args.to.is_some() {
            self.filters.to = args.to;
        }
        if let Some(shift) = args.shift {
            self.filters.shift = Some(shift.label().to_string());
        }
        if let Some(category) = args.category {
            self.filters.category = Some(category.label().to_string());
        }
        if let Some(ref agent) = args.agent {
            self.filters.agent = Some(agent.clone());
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
