//! PostgreSQL database integration
//!
//! This module provides the pooled client and the [`RecordStore`] backed by
//! a PostgreSQL table.
//!
//! [`RecordStore`]: crate::adapters::database::RecordStore

pub mod adapter;
pub mod client;

pub use adapter::{PostgreSQLStore, TableStatements};
pub use client::PostgreSQLClient;
