//! PostgreSQL record store
//!
//! Each load acquires one pooled connection and runs the whole batch inside
//! one transaction. On every exit path the transaction handle and connection
//! are dropped, which returns the connection to the pool; uncommitted work is
//! discarded by the server.

use crate::adapters::database::traits::{RecordStore, StoreSession};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::core::load::{column_id, upsert_batch, LoadReport};
use crate::domain::{EtlError, NormalizedRecord, Result};
use async_trait::async_trait;
use deadpool_postgres::Transaction;
use tokio_postgres::Statement;

/// SQL text for one target table
///
/// The table name is validated as a plain identifier at configuration time.
#[derive(Debug, Clone)]
pub struct TableStatements {
    /// `CREATE TABLE IF NOT EXISTS`
    pub create_table: String,

    /// Insert that leaves existing rows untouched
    pub insert: String,

    /// Row count
    pub count: String,
}

impl TableStatements {
    /// Build the statements for `table`
    pub fn new(table: &str) -> Self {
        Self {
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    name_id INTEGER PRIMARY KEY,
                    create_time TIMESTAMP,
                    first_name TEXT,
                    second_name TEXT
                )"
            ),
            insert: format!(
                "INSERT INTO {table} (name_id, create_time, first_name, second_name)
                VALUES ($1, CAST($2::TEXT AS TIMESTAMP), $3, $4)
                ON CONFLICT (name_id) DO NOTHING"
            ),
            count: format!("SELECT COUNT(*) FROM {table}"),
        }
    }
}

/// PostgreSQL implementation of [`RecordStore`]
pub struct PostgreSQLStore {
    client: PostgreSQLClient,
    table_name: String,
    statements: TableStatements,
}

impl PostgreSQLStore {
    /// Create a store writing to the table named in the client's configuration
    pub fn new(client: PostgreSQLClient) -> Self {
        let table_name = client.config().table_name.clone();
        Self {
            statements: TableStatements::new(&table_name),
            table_name,
            client,
        }
    }

}

#[async_trait]
impl RecordStore for PostgreSQLStore {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn load_batch(&self, records: &[NormalizedRecord]) -> Result<LoadReport> {
        let mut connection = self.client.get_connection().await?;

        let transaction = connection.transaction().await.map_err(|e| {
            EtlError::StoreUnavailable(format!("Failed to begin transaction: {}", e))
        })?;

        let timeout_ms = self.client.config().statement_timeout_seconds * 1000;
        transaction
            .batch_execute(&format!("SET LOCAL statement_timeout = {timeout_ms}"))
            .await
            .map_err(|e| {
                EtlError::StoreOperationFailed(format!("Failed to set statement timeout: {}", e))
            })?;

        let session = PostgreSQLSession {
            transaction,
            statements: &self.statements,
            insert: None,
        };

        upsert_batch(session, records).await
    }

    async fn count_rows(&self) -> Result<u64> {
        let client = self.client.get_connection().await?;

        let exists: bool = client
            .query_one("SELECT to_regclass($1::TEXT) IS NOT NULL", &[&self.table_name])
            .await
            .map_err(|e| EtlError::StoreOperationFailed(format!("Table lookup failed: {}", e)))?
            .get(0);

        if !exists {
            return Ok(0);
        }

        let count: i64 = client
            .query_one(self.statements.count.as_str(), &[])
            .await
            .map_err(|e| EtlError::StoreOperationFailed(format!("Row count failed: {}", e)))?
            .get(0);

        Ok(count.max(0) as u64)
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn describe(&self) -> String {
        self.client.connection_string_safe()
    }
}

/// One transaction on one pooled connection
struct PostgreSQLSession<'a> {
    transaction: Transaction<'a>,
    statements: &'a TableStatements,
    insert: Option<Statement>,
}

#[async_trait]
impl<'a> StoreSession for PostgreSQLSession<'a> {
    async fn ensure_table(&mut self) -> Result<()> {
        self.transaction
            .batch_execute(&self.statements.create_table)
            .await
            .map_err(|e| EtlError::StoreOperationFailed(format!("Failed to create table: {}", e)))
    }

    async fn insert_if_absent(&mut self, record: &NormalizedRecord) -> Result<bool> {
        let name_id = column_id(record.name_id)?;

        // Prepared on first use; the table must exist before INSERT can be planned.
        let statement = match &self.insert {
            Some(statement) => statement.clone(),
            None => {
                let statement = self
                    .transaction
                    .prepare(&self.statements.insert)
                    .await
                    .map_err(|e| {
                        EtlError::StoreOperationFailed(format!("Failed to prepare insert: {}", e))
                    })?;
                self.insert = Some(statement.clone());
                statement
            }
        };

        let affected = self
            .transaction
            .execute(
                &statement,
                &[
                    &name_id,
                    &record.create_time,
                    &record.first_name,
                    &record.second_name,
                ],
            )
            .await
            .map_err(|e| {
                EtlError::StoreOperationFailed(format!(
                    "Insert of name_id {} failed: {}",
                    record.name_id, e
                ))
            })?;

        Ok(affected == 1)
    }

    async fn commit(self) -> Result<()> {
        self.transaction
            .commit()
            .await
            .map_err(|e| EtlError::StoreOperationFailed(format!("Commit failed: {}", e)))
    }
}
