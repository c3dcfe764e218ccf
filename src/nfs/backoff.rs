// "Try later" backoff
//
// Each busy reply multiplies the delay, capped at the maximum:
// after N consecutive replies the delay is min(initial * multiplier^N, max).

use std::time::Duration;

use crate::config::RetryConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    delay: Duration,
    multiplier: u32,
    max: Duration,
    retries: u32,
}

impl Backoff {
    pub fn new(initial: Duration, multiplier: u32, max: Duration) -> Self {
        Self {
            delay: initial.min(max),
            multiplier,
            max,
            retries: 0,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.initial_delay(), config.multiplier, config.max_delay())
    }

    /// Record one more busy reply and return the delay to wait
    pub fn grow(&mut self) -> Duration {
        self.delay = self.delay.saturating_mul(self.multiplier).min(self.max);
        self.retries = self.retries.saturating_add(1);
        self.delay
    }

    /// Current delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Busy replies seen so far
    pub fn retries(&self) -> u32 {
        self.retries
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}
