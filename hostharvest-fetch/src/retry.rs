//! Retry policy for page requests.
//!
//! Only failures that never produced a response are retried: connection
//! errors and timeouts. A response with an error status is final.

use std::time::Duration;

/// Policy for retrying a page request that failed in transit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per page, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for every further attempt.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given number of attempts.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self::new(1)
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Returns the delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Returns true if another attempt is allowed after `attempt` failures.
    pub fn allows_another(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Determines if a request error is worth retrying.
    pub fn is_retryable(error: &reqwest::Error) -> bool {
        error.is_connect() || error.is_timeout()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(hostharvest_core::config::DEFAULT_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_secs(1));
        assert_eq!(policy.delay_after(2), Duration::from_secs(2));
        assert_eq!(policy.delay_after(3), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_capped() {
        let policy = RetryPolicy::new(10).with_base_delay(Duration::from_secs(10));
        assert_eq!(policy.delay_after(6), Duration::from_secs(30));
        assert_eq!(policy.delay_after(40), Duration::from_secs(30));
    }

    #[test]
    fn test_attempt_budget() {
        let policy = RetryPolicy::new(3);
        assert!(policy.allows_another(1));
        assert!(policy.allows_another(2));
        assert!(!policy.allows_another(3));
        assert!(!RetryPolicy::no_retry().allows_another(1));
        assert_eq!(RetryPolicy::new(0).max_attempts, 1);
    }
}
