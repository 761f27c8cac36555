//! Backoff policy between session attempts

use std::time::Duration;

use nt_core::config::BackoffConfig;

/// Exponential backoff with jitter for reconnection attempts
///
/// With a multiplier of 1.0 and no jitter this is a fixed delay, which is
/// the default policy.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    /// Delay after a reset
    initial: Duration,
    /// Current delay
    current: Duration,
    /// Maximum delay
    max: Duration,
    /// Multiplier
    multiplier: f64,
    /// Jitter factor (0.0 to 1.0)
    jitter: f64,
}

impl ExponentialBackoff {
    /// Create a new backoff from configuration
    pub fn from_config(config: &BackoffConfig) -> Self {
        Self::new(config.initial, config.max, config.multiplier, config.jitter)
    }

    /// Create a new backoff with custom parameters
    pub fn new(initial: Duration, max: Duration, multiplier: f64, jitter: f64) -> Self {
        Self {
            initial,
            current: initial,
            max,
            multiplier,
            jitter,
        }
    }

    /// Get the next delay and advance the backoff
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;

        // Out-of-range or non-finite products saturate at max
        let next = Duration::try_from_secs_f64(self.current.as_secs_f64() * self.multiplier)
            .unwrap_or(self.max);
        self.current = std::cmp::min(next, self.max);

        if self.jitter <= 0.0 {
            return delay;
        }
        let jitter_amount = delay.as_secs_f64() * self.jitter * rand::random::<f64>();
        let jitter = Duration::try_from_secs_f64(jitter_amount).unwrap_or_default();
        delay.saturating_add(jitter)
    }

    /// Reset the backoff to its initial delay
    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}
