//! In-memory record store
//!
//! Used for dry runs: the full load path runs with the same first-write-wins
//! semantics as PostgreSQL, but nothing leaves the process.

use crate::adapters::database::{RecordStore, StoreSession};
use crate::core::load::{upsert_batch, LoadReport};
use crate::domain::{NormalizedRecord, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Table {
    created: bool,
    rows: BTreeMap<i64, NormalizedRecord>,
}

/// A record store backed by a sorted map
#[derive(Debug)]
pub struct MemoryStore {
    table_name: String,
    table: Mutex<Table>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            table: Mutex::new(Table::default()),
        }
    }

    /// Snapshot of all rows ordered by `name_id`
    pub fn rows(&self) -> Vec<NormalizedRecord> {
        self.lock().rows.values().cloned().collect()
    }

    /// Whether the table has been created by a load
    pub fn table_exists(&self) -> bool {
        self.lock().created
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        // Rows are only mutated whole, so a poisoned table is still consistent.
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn load_batch(&self, records: &[NormalizedRecord]) -> Result<LoadReport> {
        let session = MemorySession {
            store: self,
            create_table: false,
            pending: BTreeMap::new(),
        };
        upsert_batch(session, records).await
    }

    async fn count_rows(&self) -> Result<u64> {
        Ok(self.lock().rows.len() as u64)
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn describe(&self) -> String {
        format!("memory://{}", self.table_name)
    }
}

/// Buffers inserts until commit; dropping it discards them
struct MemorySession<'a> {
    store: &'a MemoryStore,
    create_table: bool,
    pending: BTreeMap<i64, NormalizedRecord>,
}

#[async_trait]
impl<'a> StoreSession for MemorySession<'a> {
    async fn ensure_table(&mut self) -> Result<()> {
        self.create_table = true;
        Ok(())
    }

    async fn insert_if_absent(&mut self, record: &NormalizedRecord) -> Result<bool> {
        if self.pending.contains_key(&record.name_id)
            || self.store.lock().rows.contains_key(&record.name_id)
        {
            return Ok(false);
        }
        self.pending.insert(record.name_id, record.clone());
        Ok(true)
    }

    async fn commit(self) -> Result<()> {
        let mut table = self.store.lock();
        table.created |= self.create_table;
        for (name_id, record) in self.pending {
            table.rows.entry(name_id).or_insert(record);
        }
        Ok(())
    }
}
