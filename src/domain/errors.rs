//! Domain error types
//!
//! Only whole-stage infrastructure failures surface as errors. Malformed
//! per-message input is absorbed by the transformer and never reaches here.

use thiserror::Error;

/// Main error type for the ETL pipeline
#[derive(Debug, Error)]
pub enum EtlError {
    /// The message archive is missing or is not valid JSON
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// The staging directory or file could not be written
    #[error("Destination unwritable: {0}")]
    DestinationUnwritable(String),

    /// No connection to the record store could be obtained
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Table creation, insert, or commit failed
    #[error("Store operation failed: {0}")]
    StoreOperationFailed(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EtlError {
    /// Whether this error must halt the whole run
    ///
    /// A missing archive stops everything before any stage runs, and an
    /// unreachable store stops the load stage. Staging failures are reported
    /// but never halt loading.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EtlError::SourceUnavailable(_)
                | EtlError::StoreUnavailable(_)
                | EtlError::Configuration(_)
        )
    }

    /// Whether an orchestrator may reasonably retry the failed stage
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EtlError::StoreUnavailable(_)
                | EtlError::StoreOperationFailed(_)
                | EtlError::DestinationUnwritable(_)
                | EtlError::Io(_)
        )
    }

    /// Process exit code used by the CLI for this kind of failure
    pub fn exit_code(&self) -> i32 {
        match self {
            EtlError::Configuration(_) => 2,
            EtlError::SourceUnavailable(_) => 3,
            EtlError::StoreUnavailable(_) => 4,
            _ => 5,
        }
    }
}

impl From<std::io::Error> for EtlError {
    fn from(err: std::io::Error) -> Self {
        EtlError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EtlError {
    fn from(err: serde_json::Error) -> Self {
        EtlError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for EtlError {
    fn from(err: toml::de::Error) -> Self {
        EtlError::Configuration(format!("TOML parse error: {err}"))
    }
}
