// Surname ETL - Telegram archive to PostgreSQL loader
// Copyright (c) 2025 Surname ETL Contributors
// Licensed under the MIT License

//! # Surname ETL - Telegram archive to PostgreSQL
//!
//! Surname ETL reads an exported Telegram chat archive, keeps the messages
//! whose body looks like "first name, then a short surname", and loads them
//! into a PostgreSQL table keyed by message id.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Extracting** messages from a JSON chat export
//! - **Transforming** message bodies into name records with a positional split
//! - **Staging** every transformed batch to a timestamped JSON snapshot
//! - **Loading** records idempotently (insert if absent, first write wins)
//!
//! ## Architecture
//!
//! The crate follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Stages and their composition (extract, transform, stage, load, pipeline)
//! - [`adapters`] - Record stores (PostgreSQL, in-memory)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use surname_etl::config::load_config;
//! use surname_etl::core::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("surname-etl.toml")?;
//!     let pipeline = Pipeline::new(config)?;
//!
//!     let summary = pipeline.run().await?;
//!
//!     println!("Inserted {} records", summary.load.inserted);
//!     Ok(())
//! }
//! ```
//!
//! ## Stages
//!
//! Each stage is a plain function that takes the previous stage's output, so
//! any scheduler can sequence or re-run them independently:
//!
//! ```rust,no_run
//! use surname_etl::adapters::memory::MemoryStore;
//! use surname_etl::core::{extract::extract, load::load, stage::stage, transform::transform};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let messages = extract("data/dmitry_surname/dmitry_surname.json")?;
//! let records = transform(&messages);
//! let staged = stage(&records, "data")?;
//!
//! let store = MemoryStore::new("dmitry_surname");
//! let report = load(&records, &store).await?;
//!
//! println!("{} -> {} new rows", staged.display(), report.inserted);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], whose error type
//! [`domain::EtlError`] distinguishes source, staging, and store failures.
//! Malformed message bodies are never errors; they are absorbed by the
//! transformer.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
