use crate::*;
use std::collections::HashSet;
use thiserror::Error;

const LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Batch name is required")]
    MissingBatchName,

    #[error("Job at position {index} has no id")]
    MissingJobId { index: usize },

    #[error("Duplicate job id '{0}'")]
    DuplicateJobId(String),

    #[error("Job '{0}' rejects but has no error message")]
    MissingErrorMessage(String),

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("metrics.port must be non-zero when metrics are enabled")]
    InvalidMetricsPort,
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
}

pub fn validate_config(config: &RunnerConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_logging(&config.logging, &mut report);
    validate_metrics(&config.metrics, &mut report);
    validate_batch(&config.batch, &mut report);

    report
}

fn validate_logging(logging: &LoggingConfig, report: &mut ValidationReport) {
    if !LOG_FORMATS.contains(&logging.format.to_lowercase().as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(logging.format.clone()));
    }

    if logging.level.parse::<tracing::Level>().is_err() {
        report.add_error(ValidationError::InvalidLogLevel(logging.level.clone()));
    }
}

fn validate_metrics(metrics: &MetricsConfig, report: &mut ValidationReport) {
    if metrics.enabled && metrics.port == 0 {
        report.add_error(ValidationError::InvalidMetricsPort);
    }
}

fn validate_batch(batch: &BatchConfig, report: &mut ValidationReport) {
    if batch.name.trim().is_empty() {
        report.add_error(ValidationError::MissingBatchName);
    }

    if batch.jobs.is_empty() {
        report.add_warning("batch.jobs", "No jobs defined; the batch settles immediately");
        return;
    }

    let mut seen = HashSet::new();
    for (index, job) in batch.jobs.iter().enumerate() {
        if job.id.trim().is_empty() {
            report.add_error(ValidationError::MissingJobId { index });
        } else if !seen.insert(job.id.as_str()) {
            report.add_error(ValidationError::DuplicateJobId(job.id.clone()));
        }

        match job.outcome {
            JobOutcome::Reject if job.error.is_none() => {
                report.add_error(ValidationError::MissingErrorMessage(job.id.clone()));
            }
            JobOutcome::Resolve if job.error.is_some() => {
                report.add_warning(
                    &format!("batch.jobs.{}.error", job.id),
                    "Ignored because the job resolves",
                );
            }
            _ => {}
        }

        if job.delay_ms > long_delay_threshold_ms() {
            report.add_warning(
                &format!("batch.jobs.{}.delay_ms", job.id),
                &format!("{} ms is unusually long for a simulated job", job.delay_ms),
            );
        }
    }
}
