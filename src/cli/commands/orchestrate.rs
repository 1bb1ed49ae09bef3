//! Orchestrate command implementation
//!
//! Runs the same pipeline as `run`, but every stage is a named task retried
//! according to the `[orchestration]` section.

use crate::cli::commands::{prepare_config, report_run};
use crate::core::pipeline::Pipeline;
use crate::log_error_with_context;
use clap::Args;

/// Arguments for the orchestrate command
#[derive(Args, Debug, Default)]
pub struct OrchestrateArgs {
    /// Dry run mode - load into an in-memory store instead of PostgreSQL
    #[arg(long)]
    pub dry_run: bool,
}

impl OrchestrateArgs {
    /// Execute the orchestrate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting orchestrate command");

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

        println!(
            "🚀 Starting orchestrated run (retries: {}, delay: {}s)...",
            config.orchestration.retries, config.orchestration.retry_delay_seconds
        );

        let pipeline = match Pipeline::new(config) {
            Ok(p) => p,
            Err(e) => {
                log_error_with_context!(&e, "Failed to initialize pipeline");
                eprintln!("❌ Failed to initialize pipeline: {e}");
                return Ok(e.exit_code());
            }
        };

        match pipeline.run_orchestrated().await {
            Ok(summary) => Ok(report_run(&summary)),
            Err(e) => {
                log_error_with_context!(&e, "Orchestrated run failed");
                eprintln!("❌ Run failed: {e}");
                Ok(e.exit_code())
            }
        }
    }
}
