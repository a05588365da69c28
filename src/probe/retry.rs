use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tokio::time::sleep;

use super::error::HttpFailure;

/// Bounded retry with exponential backoff for a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,

    /// Status codes that trigger another attempt.
    pub retryable_statuses: Vec<u16>,

    /// Delay before the first retry; doubled for every retry after it.
    pub backoff_factor_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retryable_statuses: vec![500, 502, 503, 504],
            backoff_factor_ms: 1_000,
        }
    }
}

impl RetryPolicy {
    /// A policy that runs the operation exactly once.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            retryable_statuses: Vec::new(),
            backoff_factor_ms: 0,
        }
    }

    /// Delay before the `retry`-th retry (1-based): `factor * 2^(retry - 1)`.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        Duration::from_millis(self.backoff_factor_ms.saturating_mul(1u64 << exponent))
    }

    pub fn is_retryable(&self, failure: &HttpFailure) -> bool {
        match failure {
            HttpFailure::Status(code) => self.retryable_statuses.contains(code),
            HttpFailure::Timeout | HttpFailure::Transport(_) => true,
            HttpFailure::Decode(_) => false,
        }
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or the
    /// attempts are used up. The closure receives the 1-based attempt number.
    pub async fn execute<T, F, Fut>(&self, mut op: F) -> Result<T, HttpFailure>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, HttpFailure>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(failure) if attempt < max_attempts && self.is_retryable(&failure) => {
                    let delay = self.backoff_for(attempt);
                    log::warn!(
                        "Attempt {attempt}/{max_attempts} failed: {failure}; retrying in {}ms",
                        delay.as_millis()
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(failure) => {
                    if attempt > 1 {
                        log::error!("Giving up after {attempt} attempts: {failure}");
                    }
                    return Err(failure);
                }
            }
        }
    }
}
