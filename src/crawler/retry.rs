//! Retry policy for transient fetch failures

use crate::config::CrawlerConfig;
use std::time::Duration;

/// Bounded retry with a linearly growing backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total fetch attempts allowed for one page
    pub max_attempts: u32,

    /// Wait after the first failure; the n-th failure waits n times this
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts,
            backoff_base,
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.max_retries, config.backoff_delay())
    }

    /// Returns true when `failures` consecutive failures use up every attempt
    pub fn is_exhausted(&self, failures: u32) -> bool {
        failures >= self.max_attempts
    }

    /// Delay before the attempt that follows the `failures`-th failure
    pub fn backoff_for(&self, failures: u32) -> Duration {
        self.backoff_base.saturating_mul(failures.max(1))
    }
}
