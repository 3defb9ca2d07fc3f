//! plx-schedule - Schedule builder command-line tool
//!
//! Reads one or more track spreadsheets in the order given, builds the
//! combined schedule and writes it as an xlsx workbook, CSV or JSON.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use plx_common::config::{ConfigResolver, LoggingConfig};
use plx_schedule::io::{read_sheet, write_schedule, OutputFormat};
use plx_schedule::ScheduleBuilder;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for plx-schedule
#[derive(Parser, Debug)]
#[command(name = "plx-schedule")]
#[command(about = "Combine track spreadsheets into a sorted royalty schedule")]
#[command(version)]
struct Args {
    /// Source spreadsheets (.xlsx, .xls, .ods, .csv), in upload order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output file (defaults to output_filename from the config)
    #[arg(short, long, env = "PLX_OUTPUT")]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (default: from the output extension, xlsx unless .csv/.json)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PLX_LOG_LEVEL")]
    log_level: Option<String>,
}

/// Initialize tracing: RUST_LOG wins, then the configured level
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level)
            .with_context(|| format!("Invalid log level '{}'", logging.level))?,
    };

    match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let resolved = ConfigResolver::new()
        .resolve(args.config.as_deref())
        .context("Failed to load configuration")?;
    let mut config = resolved.config;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging)?;

    info!("Starting plx-schedule v{}", env!("CARGO_PKG_VERSION"));
    match resolved.source.path() {
        Some(path) => info!("Configuration: {}", path.display()),
        None => info!("Configuration: built-in defaults"),
    }

    let columns = config
        .columns
        .resolve()
        .context("Invalid column mapping")?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output_filename));
    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_path(&output));

    // Each file is read and processed to completion before the next
    let mut builder = ScheduleBuilder::new(&columns, &config.labels);
    for path in &args.files {
        let sheet = read_sheet(path, columns.required_width())
            .with_context(|| format!("Failed to read {}", path.display()))?;
        builder
            .add_file(&sheet)
            .with_context(|| format!("Failed to process {}", path.display()))?;
    }
    let schedule = builder.finish();

    if schedule.is_empty() {
        error!("No data was processed. Please check your input files and try again.");
        return Ok(ExitCode::from(2));
    }

    write_schedule(&schedule.rows, &output, format)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Files processed and combined successfully! Total rows: {}",
        schedule.len()
    );
    info!("Schedule written to {}", output.display());

    Ok(ExitCode::SUCCESS)
}
