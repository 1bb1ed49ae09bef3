//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Input model** ([`Archive`], [`RawMessage`], [`MessageText`])
//! - **Output model** ([`NormalizedRecord`])
//! - **Error types** ([`EtlError`])
//! - **Result type alias** ([`Result`])
//!
//! # Message bodies
//!
//! Exported message bodies come in several shapes. They are captured as a
//! tagged variant instead of raw JSON so the transformer has exactly one
//! place that interprets them:
//!
//! ```rust
//! use surname_etl::domain::{MessageText, RawMessage};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let message: RawMessage = serde_json::from_str(
//!     r#"{"id": 2, "date": "t", "text": ["Anna", "Ivanova"]}"#,
//! )?;
//! assert!(matches!(message.text, MessageText::Fragments(_)));
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod message;
pub mod record;
pub mod result;

pub use errors::EtlError;
pub use message::{Archive, MessageText, RawMessage};
pub use record::NormalizedRecord;
pub use result::Result;
