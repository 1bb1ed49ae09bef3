//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Surname ETL - Telegram archive to PostgreSQL loader
#[derive(Parser, Debug)]
#[command(name = "surname-etl")]
#[command(version, about, long_about = None)]
#[command(author = "Surname ETL Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "surname-etl.toml", env = "SURNAME_ETL_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SURNAME_ETL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract, transform, stage, and load the archive once
    Run(commands::run::RunArgs),

    /// Run every stage as a task with retries
    Orchestrate(commands::orchestrate::OrchestrateArgs),

    /// Load a staging file into the store
    Load(commands::load::LoadArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Check the store connection and show the row count
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Execute the selected command and return the process exit code
    pub async fn execute(&self) -> anyhow::Result<i32> {
        match &self.command {
            Commands::Run(args) => args.execute(&self.config).await,
            Commands::Orchestrate(args) => args.execute(&self.config).await,
            Commands::Load(args) => args.execute(&self.config).await,
            Commands::ValidateConfig(args) => args.execute(&self.config).await,
            Commands::Status(args) => args.execute(&self.config).await,
            Commands::Init(args) => args.execute().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["surname-etl", "run"]);
        assert_eq!(cli.config, "surname-etl.toml");
        assert!(matches!(cli.command, Commands::Run(_)));
    }

    #[test]
    fn test_cli_parse_run_overrides() {
        let cli = Cli::parse_from([
            "surname-etl",
            "run",
            "--dry-run",
            "--archive",
            "export.json",
            "--output-dir",
            "out",
            "--skip-staging",
        ]);

        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert!(args.dry_run);
        assert_eq!(args.archive.as_deref(), Some("export.json"));
        assert_eq!(args.output_dir.as_deref(), Some("out"));
        assert!(args.skip_staging);
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["surname-etl", "--config", "custom.toml", "status"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["surname-etl", "--log-level", "debug", "orchestrate"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Orchestrate(_)));
    }

    #[test]
    fn test_cli_parse_load_requires_from() {
        assert!(Cli::try_parse_from(["surname-etl", "load"]).is_err());

        let cli = Cli::parse_from(["surname-etl", "load", "--from", "data/t.json"]);
        let Commands::Load(args) = cli.command else {
            panic!("expected load command");
        };
        assert_eq!(args.from.to_str(), Some("data/t.json"));
        assert!(!args.dry_run);
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["surname-etl", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["surname-etl", "init", "--force"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected init command");
        };
        assert_eq!(args.output, "surname-etl.toml");
        assert!(args.force);
    }
}
