//! Reconnect backoff configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::serde_utils::duration_secs;

/// Backoff configuration for reconnect attempts
///
/// The defaults describe a fixed 5 second delay: `initial == max` and a
/// multiplier of 1.0 with no jitter. Raising the multiplier turns it into an
/// exponential backoff capped at `max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Initial delay
    #[serde(with = "duration_secs")]
    pub initial: Duration,

    /// Maximum delay
    #[serde(with = "duration_secs")]
    pub max: Duration,

    /// Multiplier for each retry
    pub multiplier: f64,

    /// Jitter factor (0.0 to 1.0)
    pub jitter: f64,
}

impl BackoffConfig {
    /// A constant delay with no growth and no jitter
    pub fn fixed(delay: Duration) -> Self {
        Self {
            initial: delay,
            max: delay,
            multiplier: 1.0,
            jitter: 0.0,
        }
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self::fixed(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fixed_five_seconds() {
        let config = BackoffConfig::default();
        assert_eq!(config.initial, Duration::from_secs(5));
        assert_eq!(config.max, Duration::from_secs(5));
        assert_eq!(config.multiplier, 1.0);
        assert_eq!(config.jitter, 0.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: BackoffConfig = toml::from_str("max = 60\nmultiplier = 2.0").unwrap();
        assert_eq!(config.initial, Duration::from_secs(5));
        assert_eq!(config.max, Duration::from_secs(60));
        assert_eq!(config.multiplier, 2.0);
    }
}
