//! Record store abstraction traits
//!
//! [`RecordStore`] is what the pipeline talks to. [`StoreSession`] is one
//! exclusive unit of work inside a store, acquired for a single load and
//! released when it is committed or dropped.

use crate::core::load::LoadReport;
use crate::domain::{NormalizedRecord, Result};
use async_trait::async_trait;

/// A durable store for normalized records keyed by `name_id`
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Test that the store is reachable
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if no connection can be made.
    async fn test_connection(&self) -> Result<()>;

    /// Ensure the table exists and insert every record not already present
    ///
    /// Implementations acquire one session, hand it to
    /// [`upsert_batch`](crate::core::load::upsert_batch), and release it on
    /// every exit path.
    async fn load_batch(&self, records: &[NormalizedRecord]) -> Result<LoadReport>;

    /// Number of rows currently in the target table (0 if it does not exist)
    async fn count_rows(&self) -> Result<u64>;

    /// Name of the target table
    fn table_name(&self) -> &str;

    /// Human-readable location of the store, without credentials
    fn describe(&self) -> String;
}

/// One exclusive unit of work against a store
#[async_trait]
pub trait StoreSession: Send {
    /// Create the target table if it does not exist
    async fn ensure_table(&mut self) -> Result<()>;

    /// Insert the record unless its `name_id` already exists
    ///
    /// Returns `true` if a row was written, `false` if an existing row was
    /// left untouched.
    async fn insert_if_absent(&mut self, record: &NormalizedRecord) -> Result<bool>;

    /// Make every insert of this session durable
    async fn commit(self) -> Result<()>;
}
