//! Named tasks with retries
//!
//! The orchestrated runner wraps each stage in a task. A task that fails
//! with a retryable error is attempted again after a fixed delay, up to the
//! configured number of retries.

use crate::config::OrchestrationConfig;
use crate::domain::Result;
use std::future::Future;
use std::time::Duration;

/// Retry policy for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub retries: usize,

    /// Delay between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// Run every task exactly once
    pub fn once() -> Self {
        Self {
            retries: 0,
            delay: Duration::ZERO,
        }
    }

    /// Build the policy from the `[orchestration]` section
    pub fn from_config(config: &OrchestrationConfig) -> Self {
        Self {
            retries: config.retries,
            delay: Duration::from_secs(config.retry_delay_seconds),
        }
    }
}

/// Run `task` under `policy`
///
/// `task` is called again for every attempt, so each attempt starts from the
/// same inputs.
///
/// # Errors
///
/// Returns the error of the last attempt, or the first non-retryable error.
pub async fn run_task<T, F, Fut>(name: &str, policy: RetryPolicy, mut task: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;

    loop {
        tracing::debug!(task = name, attempt, "Task started");

        match task().await {
            Ok(value) => {
                tracing::debug!(task = name, attempt, "Task succeeded");
                return Ok(value);
            }
            Err(e) if e.is_retryable() && attempt <= policy.retries => {
                crate::log_retry_attempt!(name, attempt, policy.retries + 1, e);
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(task = name, attempt, error = %e, "Task failed");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EtlError;
    use std::cell::Cell;

    fn policy(retries: usize) -> RetryPolicy {
        RetryPolicy {
            retries,
            delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let calls = Cell::new(0);
        let result = run_task("extract", policy(3), || {
            calls.set(calls.get() + 1);
            async { Ok(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_retryable_error_is_retried() {
        let calls = Cell::new(0);
        let result = run_task("load", policy(1), || {
            calls.set(calls.get() + 1);
            let attempt = calls.get();
            async move {
                if attempt == 1 {
                    Err(EtlError::StoreUnavailable("connection refused".to_string()))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let calls = Cell::new(0);
        let result: Result<()> = run_task("load", policy(2), || {
            calls.set(calls.get() + 1);
            async { Err(EtlError::StoreOperationFailed("deadlock".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(EtlError::StoreOperationFailed(_))));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_source_errors_are_not_retried() {
        let calls = Cell::new(0);
        let result: Result<()> = run_task("extract", policy(5), || {
            calls.set(calls.get() + 1);
            async { Err(EtlError::SourceUnavailable("missing".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(EtlError::SourceUnavailable(_))));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_policy_from_config() {
        let policy = RetryPolicy::from_config(&OrchestrationConfig::default());
        assert_eq!(policy.retries, 1);
        assert_eq!(policy.delay, Duration::from_secs(300));
        assert_eq!(RetryPolicy::once().retries, 0);
    }
}
