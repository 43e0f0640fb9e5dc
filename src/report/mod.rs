//! Report generation module.
//!
//! Renders a [`DashboardView`] as Markdown, JSON, or a self-contained
//! HTML page with SVG charts.

pub mod charts;
pub mod generator;
pub mod html;

pub use generator::*;

use crate::cli::OutputFormat;
use crate::config::ReportConfig;
use crate::dashboard::DashboardView;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Run information shown above the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    /// Data source description, e.g. a CSV path.
    pub source: String,
    pub total_records: usize,
    pub filtered_records: usize,
    pub duration_seconds: f64,
}

/// A rendered-ready dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub view: DashboardView,
}

/// Render a report in the requested format.
pub fn render(report: &Report, format: OutputFormat, config: &ReportConfig) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(generate_markdown_report(report)),
        OutputFormat::Json => generate_json_report(report),
        OutputFormat::Html => Ok(html::generate_html_report(report, config)),
    }
}
