//! PostgreSQL client implementation
//!
//! Owns the connection pool. Connections are handed out one at a time and
//! return to the pool when the handle is dropped.

use crate::config::schema::PostgreSQLConfig;
use crate::domain::{EtlError, Result};
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::config::SslMode;
use tokio_postgres::NoTls;

/// PostgreSQL client
///
/// Provides pooled connections and the connection settings loads rely on.
pub struct PostgreSQLClient {
    /// Connection pool
    pool: Pool,

    /// Configuration
    config: PostgreSQLConfig,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// The pool connects lazily; use [`test_connection`](Self::test_connection)
    /// to check reachability up front.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the connection string or TLS settings are
    /// invalid, and `StoreUnavailable` if the pool cannot be built.
    pub fn new(config: PostgreSQLConfig) -> Result<Self> {
        let dsn: &str = config.connection_string.expose_secret().as_ref();
        let mut pg_config: tokio_postgres::Config = dsn.parse().map_err(|e| {
            EtlError::Configuration(format!("Invalid PostgreSQL connection string: {}", e))
        })?;

        pg_config.ssl_mode(ssl_mode(&config.ssl_mode));
        pg_config.connect_timeout(Duration::from_secs(config.connection_timeout_seconds));

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = if config.ssl_mode == "disable" {
            Manager::from_config(pg_config, NoTls, manager_config)
        } else {
            Manager::from_config(pg_config, tls_connector(&config.ssl_mode)?, manager_config)
        };

        let timeout = Some(Duration::from_secs(config.connection_timeout_seconds));
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(timeout)
            .create_timeout(timeout)
            .recycle_timeout(timeout)
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .build()
            .map_err(|e| {
                EtlError::StoreUnavailable(format!("Failed to create connection pool: {}", e))
            })?;

        Ok(Self { pool, config })
    }

    /// Test the connection to PostgreSQL
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| EtlError::StoreUnavailable(format!("Connection test failed: {}", e)))?;

        tracing::info!(store = %self.connection_string_safe(), "PostgreSQL connection test successful");
        Ok(())
    }

    /// Get a connection from the pool
    ///
    /// The connection goes back to the pool when the returned handle drops.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if a connection cannot be obtained.
    pub async fn get_connection(&self) -> Result<Object> {
        self.pool.get().await.map_err(|e| {
            EtlError::StoreUnavailable(format!("Failed to get connection from pool: {}", e))
        })
    }

    /// Configuration this client was built from
    pub fn config(&self) -> &PostgreSQLConfig {
        &self.config
    }

    /// Get the connection string (without credentials)
    pub fn connection_string_safe(&self) -> String {
        self.config.connection_string.expose_secret().redacted_dsn()
    }

    /// Get the pool statistics
    pub fn pool_status(&self) -> deadpool_postgres::Status {
        self.pool.status()
    }
}

fn ssl_mode(mode: &str) -> SslMode {
    match mode {
        "disable" => SslMode::Disable,
        "require" | "verify-ca" | "verify-full" => SslMode::Require,
        _ => SslMode::Prefer,
    }
}

// Only the verify-* modes check the server certificate, as with libpq.
fn tls_connector(mode: &str) -> Result<MakeTlsConnector> {
    let verify = matches!(mode, "verify-ca" | "verify-full");

    let connector = native_tls::TlsConnector::builder()
        .danger_accept_invalid_certs(!verify)
        .danger_accept_invalid_hostnames(mode != "verify-full")
        .build()
        .map_err(|e| EtlError::Configuration(format!("Failed to build TLS connector: {}", e)))?;

    Ok(MakeTlsConnector::new(connector))
}
