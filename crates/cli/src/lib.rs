use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "settle")]
#[command(about = "Run a batch of simulated jobs and report every settlement")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the batch described by the configuration file
    Run {
        /// Path to the configuration file
        #[arg(short, long, default_value = "settle.yaml")]
        config: PathBuf,

        /// How settlement records are printed
        #[arg(short, long, value_enum, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Validate configuration without running the batch
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = "settle.yaml")]
        config: PathBuf,
    },

    /// Write a default configuration file
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = "settle.yaml")]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per record
    Pretty,
    /// The full result as JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Json => "json",
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["settle", "run"]).unwrap();
        match cli.command {
            Commands::Run { config, output } => {
                assert_eq!(config, PathBuf::from("settle.yaml"));
                assert_eq!(output, OutputFormat::Pretty);
            }
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_run_json_output() {
        let cli = Cli::try_parse_from(["settle", "run", "-c", "batch.yaml", "--output", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Run { output: OutputFormat::Json, .. }
        ));
    }
}
