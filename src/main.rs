// Surname ETL - Telegram archive to PostgreSQL loader
// Copyright (c) 2025 Surname ETL Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use surname_etl::cli::Cli;
use surname_etl::config::{read_config, LoggingConfig};
use surname_etl::logging::init_logging;

#[tokio::main]
async fn main() {
    // Optional; a missing .env is ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config file when it can be read; the
    // command itself reports configuration errors.
    let file_config = read_config(&cli.config).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = file_config
        .map(|c| c.logging)
        .unwrap_or_else(LoggingConfig::default);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Surname ETL - Telegram archive to PostgreSQL loader"
    );

    let exit_code = match cli.execute().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, so flush the file writer first.
    drop(guard);
    process::exit(exit_code);
}
