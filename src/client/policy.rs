use crate::config::ClientConfig;
use std::time::Duration;

/// Internal decision for how to proceed after a non-success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Transient-status retry policy.
///
/// Only consulted after the 401/403 handling has declined the response.
/// Keep it deterministic: no jitter, linear backoff, hard retry cap.
#[derive(Debug, Clone)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub retryable_statuses: Vec<u16>,
}

impl RetryPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: config.retry_base_delay,
            retryable_statuses: config.retryable_statuses.clone(),
        }
    }

    /// Linear backoff: `base * (retry_count + 1)`.
    fn backoff_delay(&self, retry_count: u32) -> Duration {
        self.base_delay.saturating_mul(retry_count.saturating_add(1))
    }

    /// Decide what to do with a non-success status.
    ///
    /// `retry_count` is the number of retries already spent on this call.
    pub fn decide(&self, status: u16, retry_count: u32) -> Decision {
        if self.retryable_statuses.contains(&status) && retry_count < self.max_retries {
            return Decision::Retry {
                delay: self.backoff_delay(retry_count),
            };
        }
        Decision::Fail
    }
}
