//! Load command implementation
//!
//! This module implements the `load` command, which replays a staging file
//! into the configured store.

use crate::cli::commands::prepare_config;
use crate::core::pipeline::Pipeline;
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the load command
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Staging file to load (transformed_data_<timestamp>.json)
    #[arg(long, value_name = "STAGING_FILE")]
    pub from: PathBuf,

    /// Dry run mode - load into an in-memory store instead of PostgreSQL
    #[arg(long)]
    pub dry_run: bool,
}

impl LoadArgs {
    /// Execute the load command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(from = %self.from.display(), "Starting load command");

        let config = match prepare_config(config_path, |config| {
            if self.dry_run {
                config.application.dry_run = true;
            }
        }) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        let pipeline = match Pipeline::new(config) {
            Ok(p) => p,
            Err(e) => {
                log_error_with_context!(&e, "Failed to initialize pipeline");
                eprintln!("❌ Failed to initialize pipeline: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("📥 Loading {}", self.from.display());

        match pipeline.replay(&self.from).await {
            Ok(report) => {
                println!();
                println!("  Records: {}", report.attempted);
                println!("  Inserted: {}", report.inserted);
                println!("  Already Present: {}", report.skipped);
                println!();
                println!("✅ Load completed successfully!");
                Ok(0)
            }
            Err(e) => {
                log_error_with_context!(&e, "Load failed");
                eprintln!("❌ Load failed: {e}");
                Ok(e.exit_code())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> String {
        let path = dir.path().join("surname-etl.toml");
        fs::write(&path, "[source]\narchive_path = \"unused.json\"\n").unwrap();
        path.to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn test_load_staging_file_dry_run() {
        let dir = TempDir::new().unwrap();
        let staged = dir.path().join("transformed_data_20240101_000000.json");
        fs::write(
            &staged,
            r#"[{"name_id": 1, "create_time": "2024-01-01T00:00:00", "first_name": "Anna", "second_name": "Ivanova"}]"#,
        )
        .unwrap();

        let args = LoadArgs {
            from: staged,
            dry_run: true,
        };
        assert_eq!(args.execute(&config(&dir)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_staging_file() {
        let dir = TempDir::new().unwrap();
        let args = LoadArgs {
            from: dir.path().join("absent.json"),
            dry_run: true,
        };
        assert_eq!(args.execute(&config(&dir)).await.unwrap(), 3);
    }
}
