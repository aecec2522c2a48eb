//! Printing settled batches

use anyhow::Result;
use cli::OutputFormat;
use serde::Serialize;
use settlement::{SettleResult, SettlementRecord};

use crate::jobs::{JobError, JobOutput};

pub fn print_result(result: &SettleResult<JobOutput, JobError>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Pretty => {
            let records = match result {
                Ok(records) => records.as_slice(),
                Err(failure) => failure.all(),
            };
            for line in records.iter().map(render_line) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

pub fn render_json(result: &SettleResult<JobOutput, JobError>) -> Result<String> {
    #[derive(Serialize)]
    #[serde(tag = "state", rename_all = "snake_case")]
    enum Rendered<'a> {
        AllResolved { records: &'a [SettlementRecord<JobOutput, JobError>] },
        SomeRejected { failure: &'a settlement::AggregateFailure<JobOutput, JobError> },
    }

    let rendered = match result {
        Ok(records) => Rendered::AllResolved { records },
        Err(failure) => Rendered::SomeRejected { failure },
    };
    Ok(serde_json::to_string_pretty(&rendered)?)
}

pub fn render_line(record: &SettlementRecord<JobOutput, JobError>) -> String {
    let detail = match (record.value(), record.error()) {
        (Some(output), _) => format!("{} value={}", output.id, output.value),
        (_, Some(error)) => format!("{} error={}", error.id, error.message),
        (None, None) => String::new(),
    };

    if record.annotation().is_empty() {
        format!("[{}] {}", record.kind(), detail)
    } else {
        format!(
            "[{}] {} {}",
            record.kind(),
            detail,
            serde_json::Value::Object(record.annotation().clone())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::run_batch;
    use config::generate_default_config;

    #[tokio::test(start_paused = true)]
    async fn test_default_batch_renders() {
        let config = generate_default_config();
        let result = run_batch(&config.batch).await;

        let json: serde_json::Value = serde_json::from_str(&render_json(&result).unwrap()).unwrap();
        assert_eq!(json["state"], "some_rejected");
        assert_eq!(json["failure"]["rejected"][0]["error"]["id"], "fetch-b");

        let failure = result.unwrap_err();
        let lines: Vec<String> = failure.all().iter().map(render_line).collect();
        assert!(lines[0].starts_with("[resolved] fetch-a value=1"));
        assert!(lines[1].starts_with("[rejected] fetch-b error=upstream timeout"));
    }
}
