//! Run command implementation
//!
//! This module implements the `run` command: extract, transform, stage, and
//! load once, with no retries.

use crate::cli::commands::{prepare_config, report_run};
use crate::core::pipeline::Pipeline;
use crate::log_error_with_context;
use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Dry run mode - load into an in-memory store instead of PostgreSQL
    #[arg(long)]
    pub dry_run: bool,

    /// Override the archive path
    #[arg(long, value_name = "PATH")]
    pub archive: Option<String>,

    /// Override the staging output directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Do not write a staging file
    #[arg(long)]
    pub skip_staging: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        let config = match prepare_config(config_path, |config| {
            if let Some(archive) = &self.archive {
                tracing::info!(archive = %archive, "Overriding archive path from CLI");
                config.source.archive_path = archive.clone();
            }
            if let Some(output_dir) = &self.output_dir {
                tracing::info!(output_dir = %output_dir, "Overriding staging directory from CLI");
                config.staging.output_dir = output_dir.clone();
            }
            if self.skip_staging {
                config.staging.enabled = false;
            }
            if self.dry_run {
                tracing::info!("Enabling dry-run mode from CLI");
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

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - No data will be written to the database");
            println!();
        }

        let pipeline = match Pipeline::new(config) {
            Ok(p) => p,
            Err(e) => {
                log_error_with_context!(&e, "Failed to initialize pipeline");
                eprintln!("❌ Failed to initialize pipeline: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("🚀 Starting run...");

        match pipeline.run().await {
            Ok(summary) => Ok(report_run(&summary)),
            Err(e) => {
                log_error_with_context!(&e, "Run failed");
                eprintln!("❌ Run failed: {e}");
                Ok(e.exit_code())
            }
        }
    }
}
