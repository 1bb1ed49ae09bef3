//! Pipeline coordinator
//!
//! Wires the stages together by plain function composition: each stage takes
//! the previous stage's output and returns its own. Nothing is shared between
//! stages except those values.

use crate::adapters::database::{create_record_store, RecordStore};
use crate::config::EtlConfig;
use crate::core::extract::extract;
use crate::core::load::{load, LoadReport};
use crate::core::pipeline::summary::{RunSummary, StagingOutcome};
use crate::core::pipeline::task::{run_task, RetryPolicy};
use crate::core::stage::{read_staged, stage};
use crate::core::transform::transform;
use crate::domain::{NormalizedRecord, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Extract, transform, stage, and load one archive
pub struct Pipeline {
    config: EtlConfig,
    store: Arc<dyn RecordStore>,
}

impl Pipeline {
    /// Create a pipeline with the store selected by the configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the store cannot be built.
    pub fn new(config: EtlConfig) -> Result<Self> {
        let store = create_record_store(&config)?;
        Ok(Self::with_store(config, store))
    }

    /// Create a pipeline that loads into `store`
    pub fn with_store(config: EtlConfig, store: Arc<dyn RecordStore>) -> Self {
        Self { config, store }
    }

    /// Configuration this pipeline runs with
    pub fn config(&self) -> &EtlConfig {
        &self.config
    }

    /// Store the pipeline loads into
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Run every stage once
    ///
    /// # Errors
    ///
    /// Returns `SourceUnavailable` if the archive cannot be read (nothing else
    /// runs) and the load error if loading fails. A staging failure is
    /// recorded in the summary instead.
    pub async fn run(&self) -> Result<RunSummary> {
        self.execute(RetryPolicy::once()).await
    }

    /// Run every stage as a named task, retrying retryable failures
    pub async fn run_orchestrated(&self) -> Result<RunSummary> {
        let policy = RetryPolicy::from_config(&self.config.orchestration);
        tracing::info!(
            retries = policy.retries,
            delay_secs = policy.delay.as_secs(),
            "Running orchestrated pipeline"
        );
        self.execute(policy).await
    }

    /// Load a previously written staging file
    ///
    /// # Errors
    ///
    /// Returns `SourceUnavailable` if the file cannot be read, otherwise the
    /// load error.
    pub async fn replay(&self, staging_file: impl AsRef<Path>) -> Result<LoadReport> {
        let staging_file = staging_file.as_ref();
        tracing::info!(path = %staging_file.display(), "Replaying staging file");

        let records = read_staged(staging_file)?;
        load(&records, self.store.as_ref()).await
    }

    async fn execute(&self, policy: RetryPolicy) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new(self.config.application.dry_run);

        let archive = Path::new(&self.config.source.archive_path);
        tracing::info!(
            archive = %archive.display(),
            store = %self.store.describe(),
            "Starting run"
        );

        let messages = run_task("extract", policy, || async move { extract(archive) }).await?;
        summary.messages_read = messages.len();

        let batch = messages.as_slice();
        let records = run_task("transform", policy, || async move { Ok(transform(batch)) }).await?;
        summary.records_emitted = records.len();

        summary.staging = self.stage_records(&records, policy).await;

        let store = self.store.as_ref();
        let batch = records.as_slice();
        summary.load = run_task("load", policy, || load(batch, store)).await?;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn stage_records(
        &self,
        records: &[NormalizedRecord],
        policy: RetryPolicy,
    ) -> StagingOutcome {
        if !self.config.staging.enabled {
            return StagingOutcome::Skipped;
        }

        let dir = Path::new(&self.config.staging.output_dir);
        match run_task("stage", policy, || async move { stage(records, dir) }).await {
            Ok(path) => StagingOutcome::Written(path),
            Err(e) => {
                tracing::error!(error = %e, "Staging failed, continuing with load");
                StagingOutcome::Failed(e.to_string())
            }
        }
    }
}
