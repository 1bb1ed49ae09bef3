//! CLI command implementations
//!
//! This module contains all CLI command implementations and the helpers they
//! share for loading configuration and reporting runs.

pub mod init;
pub mod load;
pub mod orchestrate;
pub mod run;
pub mod status;
pub mod validate;

use crate::config::{read_config, validate, EtlConfig};
use crate::core::pipeline::{RunSummary, StagingOutcome};
use crate::domain::Result;

/// Read the configuration, apply command-line overrides, then validate
pub(crate) fn prepare_config<F>(config_path: &str, overrides: F) -> Result<EtlConfig>
where
    F: FnOnce(&mut EtlConfig),
{
    let mut config = read_config(config_path)?;
    overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Print a run summary and return the exit code for it
pub(crate) fn report_run(summary: &RunSummary) -> i32 {
    println!();
    println!("📊 Run Summary:");
    println!("  Messages Read: {}", summary.messages_read);
    println!("  Records Emitted: {}", summary.records_emitted);
    println!("  Dropped: {}", summary.dropped());
    println!("  Inserted: {}", summary.load.inserted);
    println!("  Already Present: {}", summary.load.skipped);
    match &summary.staging {
        StagingOutcome::Written(path) => println!("  Staging File: {}", path.display()),
        StagingOutcome::Failed(error) => println!("  Staging File: not written ({error})"),
        StagingOutcome::Skipped => println!("  Staging File: skipped"),
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    let exit_code = summary.exit_code();
    if exit_code == 0 {
        println!("✅ Run completed successfully!");
    } else {
        println!("⚠️  Run completed, but the staging file could not be written");
    }
    exit_code
}
