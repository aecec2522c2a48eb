use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod parser;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use validator::*;

/// Top-level runner configuration (`settle.yaml`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// pretty | json | compact
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    pub name: String,
    /// Attach job id and latency to every record
    #[serde(default = "default_annotate")]
    pub annotate: bool,
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// One simulated computation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobConfig {
    pub id: String,
    #[serde(default)]
    pub delay_ms: u64,
    pub outcome: JobOutcome,
    /// Value produced when the job resolves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Message produced when the job rejects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOutcome {
    Resolve,
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let yaml = r#"
batch:
  name: minimal
  jobs:
    - id: only
      outcome: resolve
"#;
        let config: RunnerConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.logging.level, "info");
        assert!(!config.metrics.enabled);
        assert_eq!(config.metrics.port, 9464);
        assert!(config.batch.annotate);
        assert_eq!(config.batch.jobs[0].delay_ms, 0);
        assert_eq!(config.batch.jobs[0].outcome, JobOutcome::Resolve);
        assert!(config.batch.jobs[0].value.is_none());
    }

    #[test]
    fn test_unknown_outcome_rejected() {
        let yaml = r#"
batch:
  name: bad
  jobs:
    - id: x
      outcome: maybe
"#;
        assert!(serde_yaml::from_str::<RunnerConfig>(yaml).is_err());
    }
}
