//! Database abstraction layer
//!
//! This module provides a trait-based abstraction for record stores,
//! allowing the pipeline to load into PostgreSQL or, for dry runs, into memory.

pub mod factory;
pub mod traits;

pub use factory::create_record_store;
pub use traits::{RecordStore, StoreSession};
