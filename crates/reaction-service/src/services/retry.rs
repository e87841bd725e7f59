//! Bounded retry policy for optimistic toggles

use std::time::Duration;

use rand::Rng;
use reaction_common::ReactionConfig;

/// How often and how patiently a toggle retries after losing a race
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts before giving up, at least 1
    pub max_attempts: u32,
    /// Base delay, multiplied by the attempt number
    pub base_backoff: Duration,
    /// Deadline for the whole operation
    pub timeout: Duration,
}

impl RetryPolicy {
    /// Whether another attempt may follow `attempt`
    pub fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Linear delay after `attempt`, without jitter
    pub fn base_delay(&self, attempt: u32) -> Duration {
        self.base_backoff.saturating_mul(attempt)
    }

    /// Linear delay after `attempt` plus up to one base step of jitter
    pub fn delay(&self, attempt: u32) -> Duration {
        if self.base_backoff.is_zero() {
            return Duration::ZERO;
        }
        let jitter_ms = rand::thread_rng().gen_range(0..=self.base_backoff.as_millis() as u64);
        self.base_delay(attempt)
            .saturating_add(Duration::from_millis(jitter_ms))
    }
}

impl From<&ReactionConfig> for RetryPolicy {
    fn from(config: &ReactionConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_backoff: config.retry_backoff(),
            timeout: config.toggle_timeout(),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&ReactionConfig::default())
    }
}
