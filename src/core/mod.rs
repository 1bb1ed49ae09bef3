//! Core business logic.
//!
//! This module contains the pipeline stages and their composition.
//!
//! # Modules
//!
//! - [`extract`] - Read the message archive
//! - [`transform`] - Turn message bodies into name records
//! - [`stage`] - Write and read timestamped staging snapshots
//! - [`load`] - Idempotent insert into a record store
//! - [`pipeline`] - Stage composition, run summary, and retries
//!
//! # Workflow
//!
//! 1. **Extract**: Parse the archive and take its `messages` sequence
//! 2. **Transform**: Keep messages whose body splits into a first name and a
//!    short remainder
//! 3. **Stage**: Write the records to `transformed_data_<timestamp>.json`
//! 4. **Load**: Insert every record whose `name_id` is not yet stored
//!
//! Staging and loading both consume the transformer's output; a staging
//! failure is reported but does not stop the load.
//!
//! # Example
//!
//! ```rust,no_run
//! use surname_etl::config::load_config;
//! use surname_etl::core::pipeline::Pipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("surname-etl.toml")?;
//! let pipeline = Pipeline::new(config)?;
//!
//! let summary = pipeline.run().await?;
//!
//! println!("Read: {}", summary.messages_read);
//! println!("Inserted: {}", summary.load.inserted);
//! println!("Skipped: {}", summary.load.skipped);
//! # Ok(())
//! # }
//! ```

pub mod extract;
pub mod load;
pub mod pipeline;
pub mod stage;
pub mod transform;
