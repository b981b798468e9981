//! Retry budget and backoff for fetches.

use std::time::Duration;

use crate::client::FetchError;

/// Delay before each retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Retry immediately.
    None,
    /// Delay doubles from `base` on every retry, capped at `max`.
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// Delay before retry number `retry` (0 for the first retry).
    pub fn delay(&self, retry: u32) -> Duration {
        match *self {
            Self::None => Duration::ZERO,
            Self::Exponential { base, max } => {
                base.saturating_mul(2u32.saturating_pow(retry)).min(max)
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(1000),
        }
    }
}

/// How often a transient fetch failure is retried.
///
/// Only [`FetchError::is_transient`] failures are retried: 5xx responses,
/// timeouts and refused connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay between attempts.
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Retry up to `max_retries` times with exponential backoff.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Backoff::default(),
        }
    }

    /// Never retry.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Backoff::None,
        }
    }

    /// Replace the backoff.
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Check if attempt `attempt` (0-based) failing with `error` earns another try.
    pub fn should_retry(&self, error: &FetchError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_transient()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> FetchError {
        FetchError::Http {
            status,
            url: "http://api/stock/1".to_string(),
        }
    }

    #[test]
    fn test_exponential_backoff_is_capped() {
        let backoff = Backoff::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(300),
        };
        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(1), Duration::from_millis(200));
        assert_eq!(backoff.delay(2), Duration::from_millis(300));
        assert_eq!(backoff.delay(40), Duration::from_millis(300));
    }

    #[test]
    fn test_budget_is_respected() {
        let policy = RetryPolicy::new(2);
        assert!(policy.should_retry(&http(503), 0));
        assert!(policy.should_retry(&http(500), 1));
        assert!(!policy.should_retry(&http(500), 2));
    }

    #[test]
    fn test_only_transient_failures_retry() {
        let policy = RetryPolicy::new(1);
        assert!(!policy.should_retry(&http(404), 0));
        assert!(!policy.should_retry(&FetchError::Deserialization("eof".into()), 0));
        assert!(policy.should_retry(&FetchError::Connection("refused".into()), 0));
        assert!(policy.should_retry(
            &FetchError::Timeout {
                elapsed_ms: 2000,
                url: "http://api/stock/1".into(),
            },
            0
        ));
    }

    #[test]
    fn test_none_never_retries() {
        let policy = RetryPolicy::none();
        assert!(!policy.should_retry(&http(503), 0));
        assert_eq!(policy.backoff.delay(0), Duration::ZERO);
    }
}
