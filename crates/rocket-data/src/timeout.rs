//! Timeout configuration for fetch operations.

use std::time::Duration;

/// Timeout configuration for a fetch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total time for one attempt, including reading the body.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            total,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(Duration::from_millis(5000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_total_splits_connect() {
        let config = TimeoutConfig::from_total(Duration::from_millis(2000));
        assert_eq!(config.connect, Duration::from_millis(500));
        assert_eq!(config.total, Duration::from_millis(2000));
    }
}
