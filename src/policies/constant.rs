//! # Constant retry policy.
//!
//! [`ConstantPolicy`] waits the same interval between every pair of attempts.
//! It is the policy [`retry`](crate::retry) falls back to when none is given.
//!
//! ## Defaults
//! - `interval = max_interval = 1s`
//! - `deadline = now + 30s` (measured at construction)
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{ConstantPolicy, RetryPolicy};
//!
//! let p = ConstantPolicy::new()
//!     .with_interval(Duration::from_millis(50))
//!     .with_timeout(Duration::from_millis(160));
//!
//! for attempt in 1..=5 {
//!     assert_eq!(p.sleep_duration(attempt, Duration::from_secs(9)), Duration::from_millis(50));
//! }
//! ```

use std::time::Duration;

use crate::policies::{config::PolicyConfig, policy::RetryPolicy};

pub(crate) const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Policy with a fixed delay between attempts.
#[derive(Clone, Debug)]
pub struct ConstantPolicy {
    config: PolicyConfig,
}

impl ConstantPolicy {
    /// Creates a constant policy with default interval (1s) and timeout (30s).
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: PolicyConfig::new(DEFAULT_INTERVAL, DEFAULT_INTERVAL, 1, DEFAULT_TIMEOUT),
        }
    }
}

impl Default for ConstantPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicy for ConstantPolicy {
    fn config(&self) -> &PolicyConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut PolicyConfig {
        &mut self.config
    }

    /// Ignores both arguments and returns the configured interval.
    fn sleep_duration(&self, _attempt: u32, _previous: Duration) -> Duration {
        self.config.interval
    }
}
