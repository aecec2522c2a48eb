//! settle runner
//!
//! Loads a batch of simulated jobs from YAML, settles them all
//! concurrently and prints every record.

mod jobs;
mod report;

use anyhow::{Context, Result};
use cli::{Cli, Commands, OutputFormat};
use config::{generate_default_config, load_config, save_config, validate_config, RunnerConfig};
use observability::{init_logging, LogFormat};
use std::path::Path;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Run { config, output } => run_command(config, output).await,
        Commands::Validate { config } => {
            init_logging("settle", LogFormat::Pretty, "info")?;
            validate_command(config)
        }
        Commands::Init { output } => {
            init_logging("settle", LogFormat::Pretty, "info")?;
            init_command(output)
        }
    }
}

/// Load and validate, logging every warning; fails on any validation error
fn load_valid_config(config_path: &Path) -> Result<RunnerConfig> {
    let config = load_config(config_path)?;
    let report = validate_config(&config);

    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message, "Configuration warning");
    }

    if !report.is_valid() {
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!(
            "Configuration has {} error(s); run 'settle validate' for details",
            report.errors.len()
        );
    }

    Ok(config)
}

async fn run_command<P: AsRef<Path>>(config_path: P, output: OutputFormat) -> Result<()> {
    let config = load_valid_config(config_path.as_ref())?;

    let format = LogFormat::parse(&config.logging.format).unwrap_or_default();
    init_logging("settle", format, &config.logging.level)?;

    if config.metrics.enabled {
        observability::init_metrics(config.metrics.port)?;
    }

    info!(
        batch = %config.batch.name,
        jobs = config.batch.jobs.len(),
        annotate = config.batch.annotate,
        output = output.as_str(),
        "Running batch"
    );

    let result = jobs::run_batch(&config.batch).await;
    report::print_result(&result, output)?;

    match result {
        Ok(records) => {
            info!(resolved = records.len(), "All jobs resolved");
            Ok(())
        }
        Err(failure) => {
            let rejected: Vec<&str> = failure
                .rejected()
                .into_iter()
                .filter_map(|record| record.error().map(|e| e.id.as_str()))
                .collect();
            error!(?rejected, "Batch settled with rejections");
            Err(anyhow::Error::new(failure)).context(format!("Batch '{}' failed", config.batch.name))
        }
    }
}

fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    info!(path = ?config_path.as_ref(), "Validating configuration");

    let config = load_config(&config_path)?;
    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Batch: {}", config.batch.name);
    println!("Jobs: {}", config.batch.jobs.len());
    println!("Annotate: {}", config.batch.annotate);
    println!("Metrics: {}", if config.metrics.enabled { "enabled" } else { "disabled" });

    Ok(())
}

fn init_command<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!(?output_path, "Initializing new configuration file");

    let config = generate_default_config();

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    save_config(&config, output_path)?;

    println!("[ok] Configuration file created: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Edit the jobs under 'batch.jobs'");
    println!("  2. Run 'settle validate --config {:?}'", output_path);
    println!("  3. Run 'settle run --config {:?}'", output_path);

    Ok(())
}
