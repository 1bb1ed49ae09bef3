//! Record store factory
//!
//! This module provides the factory function that creates a record store
//! based on configuration.

use crate::adapters::database::traits::RecordStore;
use crate::adapters::memory::MemoryStore;
use crate::adapters::postgresql::{PostgreSQLClient, PostgreSQLStore};
use crate::config::schema::{EtlConfig, DEFAULT_TABLE_NAME};
use crate::domain::{EtlError, Result};
use std::sync::Arc;

/// Create a record store based on the configuration
///
/// Dry runs get a [`MemoryStore`] named after the configured table (or the
/// default table when no PostgreSQL section is present). Otherwise a pooled
/// [`PostgreSQLStore`] is built; no connection is opened until first use.
///
/// # Errors
///
/// Returns `Configuration` if PostgreSQL settings are missing or invalid.
pub fn create_record_store(config: &EtlConfig) -> Result<Arc<dyn RecordStore>> {
    if config.application.dry_run {
        let table = config
            .postgresql
            .as_ref()
            .map(|pg| pg.table_name.clone())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());

        tracing::info!(table = %table, "Dry run: using in-memory record store");
        return Ok(Arc::new(MemoryStore::new(table)));
    }

    let pg_config = config.postgresql.as_ref().ok_or_else(|| {
        EtlError::Configuration("[postgresql] section is required unless dry_run is set".to_string())
    })?;

    tracing::info!("Creating PostgreSQL record store");
    let client = PostgreSQLClient::new(pg_config.clone())?;
    Ok(Arc::new(PostgreSQLStore::new(client)))
}
