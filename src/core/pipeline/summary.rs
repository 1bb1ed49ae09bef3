//! Run summary and reporting
//!
//! This module defines the structure that records what one pipeline run did.

use crate::core::load::LoadReport;
use std::path::PathBuf;
use std::time::Duration;

/// What happened to the staging snapshot of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagingOutcome {
    /// Staging was disabled for this run
    Skipped,

    /// The snapshot was written to this path
    Written(PathBuf),

    /// The snapshot could not be written; loading went ahead anyway
    Failed(String),
}

/// Summary of one pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Messages read from the archive
    pub messages_read: usize,

    /// Records produced by the transformer
    pub records_emitted: usize,

    /// Staging result
    pub staging: StagingOutcome,

    /// Load result
    pub load: LoadReport,

    /// Whether the records went to an in-memory store
    pub dry_run: bool,

    /// Duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Create a new empty run summary
    pub fn new(dry_run: bool) -> Self {
        Self {
            messages_read: 0,
            records_emitted: 0,
            staging: StagingOutcome::Skipped,
            load: LoadReport::default(),
            dry_run,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Messages the transformer dropped
    pub fn dropped(&self) -> usize {
        self.messages_read.saturating_sub(self.records_emitted)
    }

    /// Path of the staging file, if one was written
    pub fn staged_path(&self) -> Option<&PathBuf> {
        match &self.staging {
            StagingOutcome::Written(path) => Some(path),
            _ => None,
        }
    }

    /// Check if every stage succeeded
    pub fn is_successful(&self) -> bool {
        !matches!(self.staging, StagingOutcome::Failed(_))
    }

    /// Process exit code for a run that reached the end (0, or 1 when staging failed)
    pub fn exit_code(&self) -> i32 {
        if self.is_successful() {
            0
        } else {
            1
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            messages_read = self.messages_read,
            records_emitted = self.records_emitted,
            dropped = self.dropped(),
            inserted = self.load.inserted,
            skipped = self.load.skipped,
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            "Run completed"
        );

        match &self.staging {
            StagingOutcome::Written(path) => {
                tracing::info!(path = %path.display(), "Staging file written")
            }
            StagingOutcome::Failed(error) => {
                tracing::warn!(error = %error, "Run completed without a staging file")
            }
            StagingOutcome::Skipped => tracing::debug!("Staging skipped"),
        }
    }
}
