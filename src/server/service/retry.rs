//! Retry logic with exponential backoff for service operations.
//!
//! Domain services wrap each unit of work (usually one database transaction) in
//! [`RetryContext::execute_with_retry`]. Only errors classified as
//! [`ErrorRetryStrategy::Retry`] are attempted again; a failed attempt's transaction has
//! already rolled back when it is dropped, so every attempt starts from a clean state.

use std::{future::Future, pin::Pin, time::Duration};

use crate::server::error::{retry::ErrorRetryStrategy, Error};

/// Executes operations with automatic retry and exponential backoff.
///
/// # Retry Behavior
///
/// - **Max attempts**: 3
/// - **Backoff strategy**: Exponential starting at 1 second (1s, 2s)
/// - **Permanent failures**: Errors with `ErrorRetryStrategy::Fail` return immediately
///
/// # Example
///
/// ```ignore
/// let db = self.db.clone();
///
/// RetryContext::new()
///     .execute_with_retry("approve member", || {
///         let db = db.clone();
///
///         Box::pin(async move {
///             let txn = db.begin().await?;
///             // ... conditional update and counter increment ...
///             txn.commit().await?;
///             Ok(())
///         })
///     })
///     .await
/// ```
pub struct RetryContext {
    max_attempts: u32,
    initial_backoff_secs: u64,
}

impl Default for RetryContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryContext {
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_INITIAL_BACKOFF_SECS: u64 = 1;

    pub fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_backoff_secs: Self::DEFAULT_INITIAL_BACKOFF_SECS,
        }
    }

    /// Execute an operation with automatic retry logic
    ///
    /// # Arguments
    /// - `description`: Description of the operation for logging (e.g., "approve member")
    /// - `operation`: Builds a fresh future for each attempt
    pub async fn execute_with_retry<R, F>(&self, description: &str, operation: F) -> Result<R, Error>
    where
        F: Fn() -> Pin<Box<dyn Future<Output = Result<R, Error>> + Send>>,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => match e.to_retry_strategy() {
                    ErrorRetryStrategy::Fail => {
                        tracing::debug!("Permanent error for {}: {}", description, e);
                        return Err(e);
                    }
                    ErrorRetryStrategy::Retry => {
                        attempt_count += 1;
                        if attempt_count >= self.max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {:?}",
                                self.max_attempts,
                                description,
                                e
                            );
                            return Err(e);
                        }

                        let backoff_secs = self.initial_backoff_secs * 2_u64.pow(attempt_count - 1);
                        let backoff = Duration::from_secs(backoff_secs);

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {:?}",
                            description,
                            attempt_count,
                            self.max_attempts,
                            backoff,
                            e
                        );

                        tokio::time::sleep(backoff).await;
                    }
                },
            }
        }
    }
}
