//! Simulated jobs driven through `settle_all`

use std::time::Duration;

use config::{BatchConfig, JobConfig, JobOutcome};
use serde::Serialize;
use serde_json::{json, Value};
use settlement::{settle_all, Annotators, SettleResult};
use thiserror::Error;
use tokio::time::Instant;
use tracing::debug;

/// Value produced by a resolving job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobOutput {
    pub id: String,
    pub value: Value,
    pub elapsed_ms: u64,
}

/// Failure produced by a rejecting job
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("job {id} failed: {message}")]
pub struct JobError {
    pub id: String,
    pub message: String,
    pub elapsed_ms: u64,
}

/// Sleep for the configured delay, then settle as configured
pub async fn run_job(job: JobConfig) -> Result<JobOutput, JobError> {
    let started = Instant::now();
    tokio::time::sleep(Duration::from_millis(job.delay_ms)).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    debug!(job = %job.id, outcome = ?job.outcome, elapsed_ms, "Job finished");

    match job.outcome {
        JobOutcome::Resolve => Ok(JobOutput {
            id: job.id,
            value: job.value.unwrap_or(Value::Null),
            elapsed_ms,
        }),
        JobOutcome::Reject => Err(JobError {
            id: job.id,
            message: job.error.unwrap_or_else(|| "rejected".to_string()),
            elapsed_ms,
        }),
    }
}

/// Job id and latency on every record; empty annotations when disabled
pub fn job_annotators(enabled: bool) -> Annotators<'static, JobOutput, JobError> {
    if !enabled {
        return Annotators::none();
    }

    Annotators::none()
        .on_resolved(|output: &JobOutput| {
            json!({ "job": output.id, "latency_ms": output.elapsed_ms })
        })
        .on_rejected(|error: &JobError| {
            json!({ "job": error.id, "latency_ms": error.elapsed_ms, "reason": error.message })
        })
}

pub async fn run_batch(batch: &BatchConfig) -> SettleResult<JobOutput, JobError> {
    settle_all(batch.jobs.clone(), run_job, job_annotators(batch.annotate)).await
}
