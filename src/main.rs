//! QADash - call-center QA performance dashboard
//!
//! A CLI tool that builds a table of call records (synthetic or from
//! CSV), filters it, and renders KPIs and chart views as a Markdown,
//! JSON, or HTML report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (arguments, config, data, filter, or write failure)

mod analysis;
mod cli;
mod config;
mod dashboard;
mod data;
mod error;
mod filter;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::{Config, CONFIG_FILE};
use dashboard::Dashboard;
use data::loader::{self, LoadOptions};
use data::DataSource;
use indicatif::{ProgressBar, ProgressStyle};
use report::{Report, ReportMetadata};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    let (mut config, config_path) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(log_level(&args, &config));

    info!("QADash v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match config_path {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }

    if let Err(e) = run(&args, &config) {
        error!("Dashboard failed: {:#}", e);
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .qadash.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE
        );
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("Created {} with default settings.", CONFIG_FILE);
    println!("Edit it to set the data source, default filters, and report styling.");
    Ok(())
}

/// Log level from flags, falling back to `[general] verbose`.
fn log_level(args: &Args, config: &Config) -> tracing::Level {
    if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    }
}

/// Initialize logging on stderr. `RUST_LOG` overrides the level.
fn init_logging(level: tracing::Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from an explicit path, the default file, or defaults.
fn load_config(args: &Args) -> Result<(Config, Option<PathBuf>)> {
    if let Some(ref config_path) = args.config {
        return Ok((Config::load(config_path)?, Some(config_path.clone())));
    }

    Ok(match Config::load_default()? {
        Some(config) => (config, Some(PathBuf::from(CONFIG_FILE))),
        None => (Config::default(), None),
    })
}

/// Pick the data source from the merged configuration.
fn data_source(config: &Config) -> DataSource {
    match config.data.csv {
        Some(ref path) => DataSource::Csv {
            path: path.clone(),
            options: LoadOptions {
                clamp_out_of_range: config.data.clamp_out_of_range,
            },
        },
        None => DataSource::Synthetic((&config.data).into()),
    }
}

/// Build the table once, with a spinner unless quiet.
fn acquire(source: &DataSource, quiet: bool) -> Result<Dashboard> {
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };
    spinner.set_message(format!("Loading records from {}", source));

    let records = source.acquire();
    spinner.finish_and_clear();

    let records = records.with_context(|| format!("Failed to load records from {}", source))?;
    info!("Loaded {} records from {}", records.len(), source);

    Ok(Dashboard::new(records)?)
}

/// Run the dashboard workflow for one filter selection.
fn run(args: &Args, config: &Config) -> Result<()> {
    let start_time = Instant::now();

    let source = data_source(config);
    let dashboard = acquire(&source, args.quiet)?;

    if let Some(ref path) = args.export_csv {
        loader::write_csv(path, dashboard.records())
            .with_context(|| format!("Failed to export CSV to {}", path.display()))?;
        info!("Exported {} records to {}", dashboard.records().len(), path.display());
    }

    if args.list_options {
        print_options(&dashboard);
        return Ok(());
    }

    let filter = config.filters.to_filter()?;
    let view = dashboard.view(&filter)?;
    info!("Filter: {}", view.filter.describe());

    let report = Report {
        metadata: ReportMetadata {
            title: config.report.title.clone(),
            generated_at: Utc::now(),
            source: source.to_string(),
            total_records: dashboard.records().len(),
            filtered_records: view.kpis.total_records,
            duration_seconds: start_time.elapsed().as_secs_f64(),
        },
        view,
    };

    let format = config.general.format;
    let output = report::render(&report, format, &config.report)?;
    let output_path = config.general.effective_output();
    let to_stdout = output_path == Path::new("-");

    if to_stdout {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(output.as_bytes())
            .context("Failed to write report to stdout")?;
        stdout.flush().context("Failed to flush stdout")?;
    } else {
        std::fs::write(&output_path, &output)
            .with_context(|| format!("Failed to write report to {}", output_path.display()))?;
    }

    if !args.quiet && !to_stdout {
        println!("{}", analysis::kpi_summary_text(&report.view.kpis));
        println!(
            "\nReport ({:?}) saved to: {}",
            format,
            output_path.display()
        );
    }

    Ok(())
}

/// Print every value each filter accepts.
fn print_options(dashboard: &Dashboard) {
    let options = dashboard.options();

    println!("Date range: {} to {}", options.date_min, options.date_max);
    println!(
        "Shifts: {}",
        options
            .shifts
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "Categories: {}",
        options
            .categories
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Agents:");
    for agent in &options.agents {
        println!("  {} ({})", agent.name, agent.id);
    }
}
