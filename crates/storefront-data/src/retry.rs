//! Retry policy for transient remote failures.

use std::time::Duration;

/// Retry configuration: attempt ceiling plus exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first (not "retries after").
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each attempt after that.
    pub base_delay: Duration,
    /// Upper bound on any single computed delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the default backoff.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Create a policy that never retries.
    pub fn none() -> Self {
        Self::new(1)
    }

    /// Set the backoff base delay.
    pub fn with_base_delay(mut self, base: Duration) -> Self {
        self.base_delay = base;
        self
    }

    /// Backoff delay after the given 1-based attempt: base * 2^(attempt-1),
    /// capped at `max_delay`.
    pub fn delay_after_attempt(&self, attempt: u32) -> Duration {
        let multiplier = 2u64.saturating_pow(attempt.saturating_sub(1));
        let delay_ms = (self.base_delay.as_millis() as u64).saturating_mul(multiplier);
        std::cmp::min(Duration::from_millis(delay_ms), self.max_delay)
    }

    /// Whether another attempt is allowed after `attempt` attempts were made.
    pub fn allows_another_attempt(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// Whether an HTTP status warrants a retry (rate limit or server error).
pub(crate) fn retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}
