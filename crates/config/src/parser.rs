use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunnerConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());

    let config: RunnerConfig = serde_yaml::from_str(&content)
        .with_context(|| "Failed to parse YAML configuration")?;

    info!(jobs = config.batch.jobs.len(), batch = %config.batch.name, "Configuration loaded");
    Ok(config)
}

/// A small batch with one rejection, useful as a starting point
#[instrument]
pub fn generate_default_config() -> RunnerConfig {
    RunnerConfig {
        logging: LoggingConfig::default(),
        metrics: MetricsConfig::default(),
        batch: BatchConfig {
            name: "demo".to_string(),
            annotate: default_annotate(),
            jobs: vec![
                JobConfig {
                    id: "fetch-a".to_string(),
                    delay_ms: 30,
                    outcome: JobOutcome::Resolve,
                    value: Some(serde_json::json!(1)),
                    error: None,
                },
                JobConfig {
                    id: "fetch-b".to_string(),
                    delay_ms: 10,
                    outcome: JobOutcome::Reject,
                    value: None,
                    error: Some("upstream timeout".to_string()),
                },
                JobConfig {
                    id: "fetch-c".to_string(),
                    delay_ms: 20,
                    outcome: JobOutcome::Resolve,
                    value: Some(serde_json::json!({ "rows": 3 })),
                    error: None,
                },
            ],
        },
    }
}

#[instrument(skip(config))]
pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &RunnerConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}
