//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output
//! - JSON-formatted log files with rotation
//! - Configurable log levels
//!
//! # Example
//!
//! ```no_run
//! use surname_etl::logging::init_logging;
//! use surname_etl::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use surname_etl::log_error_with_context;
/// use surname_etl::domain::EtlError;
///
/// let error = EtlError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use surname_etl::log_retry_attempt;
///
/// log_retry_attempt!("load", 1, 2, "Connection refused");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($task:expr, $attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            task = $task,
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying task"
        );
    };
}
