use std::time::Duration;

/// Timing of a [`crate::RequestManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestManagerConfig {
    /// How long a request waits for its reply.
    pub timeout: Duration,
    /// Lower bound between two expiry sweeps.
    pub min_sweep_interval: Duration,
}

impl Default for RequestManagerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            min_sweep_interval: Duration::from_millis(100),
        }
    }
}

impl RequestManagerConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_min_sweep_interval(mut self, interval: Duration) -> Self {
        self.min_sweep_interval = interval.max(Duration::from_millis(1));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::RequestManagerConfig;
    use std::time::Duration;

    #[test]
    fn defaults_and_setters() {
        let config = RequestManagerConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.min_sweep_interval, Duration::from_millis(100));

        let config = config
            .with_timeout(Duration::from_millis(500))
            .with_min_sweep_interval(Duration::ZERO);
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.min_sweep_interval, Duration::from_millis(1));
    }
}
