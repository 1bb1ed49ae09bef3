//! Pipeline orchestration
//!
//! This module provides the [`Pipeline`] that composes the stages, the
//! [`RunSummary`] it reports, and the retry wrapper used by orchestrated runs.

pub mod coordinator;
pub mod summary;
pub mod task;

pub use coordinator::Pipeline;
pub use summary::{RunSummary, StagingOutcome};
pub use task::{run_task, RetryPolicy};
