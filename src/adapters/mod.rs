//! External system integrations.
//!
//! This module provides the record stores the pipeline loads into:
//!
//! - [`database`] - Store abstraction layer (trait-based) and factory
//! - [`postgresql`] - PostgreSQL implementation
//! - [`memory`] - In-memory implementation used for dry runs and tests
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations.
//!
//! ```rust,no_run
//! use surname_etl::adapters::database::create_record_store;
//! use surname_etl::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("surname-etl.toml")?;
//! let store = create_record_store(&config)?;
//! store.test_connection().await?;
//! println!("{} rows in {}", store.count_rows().await?, store.table_name());
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod memory;
pub mod postgresql;
