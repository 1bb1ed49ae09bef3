//! Idempotent load
//!
//! Every record is offered to the store once; rows whose `name_id` already
//! exists are left untouched (first write wins), so loading the same batch
//! any number of times yields the same rows as loading it once.

use crate::adapters::database::{RecordStore, StoreSession};
use crate::domain::{EtlError, NormalizedRecord, Result};

/// Outcome of one load invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records offered to the store
    pub attempted: usize,

    /// Records written as new rows
    pub inserted: usize,

    /// Records skipped because their `name_id` already existed
    pub skipped: usize,
}

impl LoadReport {
    /// Log the report
    pub fn log(&self, table: &str) {
        tracing::info!(
            table = %table,
            attempted = self.attempted,
            inserted = self.inserted,
            skipped = self.skipped,
            "Load completed"
        );
    }
}

/// Load the batch into `store`
///
/// # Errors
///
/// Returns `StoreUnavailable` if no session can be acquired and
/// `StoreOperationFailed` if table creation, an insert, or the commit fails.
/// The remaining records are not attempted after the first failure.
pub async fn load(records: &[NormalizedRecord], store: &dyn RecordStore) -> Result<LoadReport> {
    tracing::info!(
        table = %store.table_name(),
        store = %store.describe(),
        records = records.len(),
        "Loading records"
    );

    let report = store.load_batch(records).await?;
    report.log(store.table_name());
    Ok(report)
}

/// Narrow `name_id` to the store's `INTEGER` key column
///
/// # Errors
///
/// Returns `StoreOperationFailed` for ids outside the `i32` range.
pub fn column_id(name_id: i64) -> Result<i32> {
    i32::try_from(name_id).map_err(|_| {
        EtlError::StoreOperationFailed(format!(
            "name_id {} does not fit an INTEGER column",
            name_id
        ))
    })
}

/// Drive one session through ensure-table, insert-if-absent, and commit
///
/// Every id is checked with [`column_id`] before it is offered to the
/// session, so all stores reject the same batches. The session is consumed. On error it is dropped uncommitted, which
/// releases it back to its store.
pub async fn upsert_batch<S>(mut session: S, records: &[NormalizedRecord]) -> Result<LoadReport>
where
    S: StoreSession,
{
    session.ensure_table().await?;

    let mut report = LoadReport {
        attempted: records.len(),
        ..LoadReport::default()
    };

    for record in records {
        column_id(record.name_id)?;

        if session.insert_if_absent(record).await? {
            report.inserted += 1;
        } else {
            tracing::trace!(name_id = record.name_id, "Row exists, skipped");
            report.skipped += 1;
        }
    }

    session.commit().await?;
    Ok(report)
}
