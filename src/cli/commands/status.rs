//! Status command implementation
//!
//! This module implements the `status` command: a connection check, the row
//! count of the target table, and the most recent staging file.

use crate::adapters::database::create_record_store;
use crate::cli::commands::prepare_config;
use crate::core::stage::latest_staging_file;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking status");

        println!("📊 Status");
        println!();

        let config = match prepare_config(config_path, |_| {}) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        let store = match create_record_store(&config) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to create record store");
                println!("   Error: {}", e);
                return Ok(e.exit_code());
            }
        };

        println!("  Store: {}", store.describe());
        println!("  Table: {}", store.table_name());

        if let Err(e) = store.test_connection().await {
            println!("❌ Failed to connect to database");
            println!("   Error: {}", e);
            return Ok(4);
        }

        match store.count_rows().await {
            Ok(count) => println!("  Rows: {count}"),
            Err(e) => {
                println!("❌ Failed to count rows");
                println!("   Error: {}", e);
                return Ok(e.exit_code());
            }
        }

        match latest_staging_file(&config.staging.output_dir) {
            Ok(Some(path)) => println!("  Latest Staging File: {}", path.display()),
            Ok(None) => println!("  Latest Staging File: none"),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list staging directory");
                println!("  Latest Staging File: unknown ({e})");
            }
        }

        println!();
        println!("✅ Store is reachable");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_status_dry_run() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("surname-etl.toml");
        fs::write(
            &config_path,
            format!(
                "[application]\ndry_run = true\n\n[source]\narchive_path = \"a.json\"\n\n[staging]\noutput_dir = {:?}\n",
                dir.path().display().to_string()
            ),
        )
        .unwrap();

        let code = StatusArgs {}
            .execute(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_status_missing_config() {
        let code = StatusArgs {}
            .execute("/nonexistent/surname-etl.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
