//! # Exponential backoff policy.
//!
//! [`BackoffPolicy`] multiplies the previously waited delay by an integer factor:
//! - attempt `1` waits the base `interval`;
//! - attempt `n > 1` waits `previous × factor`, clamped to `max_interval`.
//!
//! The sequence is non-decreasing and saturates **exactly** at `max_interval`;
//! once reached, every later delay equals the cap.
//!
//! The delay is derived from the duration actually waited, not from the attempt
//! number, so a custom `previous` fed by the engine is what compounds.
//!
//! ## Defaults
//! - `interval = 100ms`
//! - `max_interval = 60s`
//! - `factor = 2`
//! - `deadline = now + 2min` (measured at construction)
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{BackoffPolicy, RetryPolicy};
//!
//! let backoff = BackoffPolicy::new()
//!     .with_factor(3)
//!     .with_interval(Duration::from_millis(50))
//!     .with_max_interval(Duration::from_secs(10));
//!
//! // Attempt 1 uses the base interval.
//! assert_eq!(backoff.sleep_duration(1, Duration::ZERO), Duration::from_millis(50));
//!
//! // Attempt 2: 50ms × 3.
//! assert_eq!(backoff.sleep_duration(2, Duration::from_millis(50)), Duration::from_millis(150));
//!
//! // 4.05s × 3 = 12.15s → capped at 10s.
//! assert_eq!(backoff.sleep_duration(6, Duration::from_millis(4_050)), Duration::from_secs(10));
//! ```

use std::time::Duration;

use crate::policies::{config::PolicyConfig, policy::RetryPolicy};

const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(60);
const DEFAULT_FACTOR: u32 = 2;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Retry backoff policy.
///
/// Encapsulates parameters that determine how retry delays grow:
/// - `factor` multiplicative growth factor;
/// - `interval` the first delay;
/// - `max_interval` the delay cap.
#[derive(Clone, Debug)]
pub struct BackoffPolicy {
    config: PolicyConfig,
}

impl BackoffPolicy {
    /// Returns a policy with:
    /// - `factor = 2` (doubling);
    /// - `interval = 100ms`;
    /// - `max_interval = 60s`;
    /// - `timeout = 2min`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: PolicyConfig::new(
                DEFAULT_INTERVAL,
                DEFAULT_MAX_INTERVAL,
                DEFAULT_FACTOR,
                DEFAULT_TIMEOUT,
            ),
        }
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicy for BackoffPolicy {
    fn config(&self) -> &PolicyConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut PolicyConfig {
        &mut self.config
    }

    /// Computes the delay after the given (1-based) attempt.
    ///
    /// ### Notes
    /// - `attempt == 1` ignores `previous` and returns `interval`.
    /// - A product that overflows `Duration` is clamped like any other oversized delay.
    /// - `factor = 0` yields zero delays from attempt 2 on; `factor = 1` keeps `previous`.
    fn sleep_duration(&self, attempt: u32, previous: Duration) -> Duration {
        if attempt == 1 {
            return self.config.interval;
        }
        match previous.checked_mul(self.config.factor) {
            Some(next) if next <= self.config.max_interval => next,
            _ => self.config.max_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds each computed delay back as `previous`, the way the engine does.
    fn generate(count: u32, p: &impl RetryPolicy) -> Vec<Duration> {
        let mut sleeps = Vec::with_capacity(count as usize);
        let mut previous = Duration::ZERO;
        for attempt in 1..=count {
            let current = p.sleep_duration(attempt, previous);
            sleeps.push(current);
            previous = current;
        }
        sleeps
    }

    #[test]
    fn test_default_sequence_saturates_at_sixty_seconds() {
        let sleeps = generate(12, &BackoffPolicy::new());
        let expected_ms = [
            100, 200, 400, 800, 1_600, 3_200, 6_400, 12_800, 25_600, 51_200, 60_000, 60_000,
        ];
        for (i, (got, ms)) in sleeps.iter().zip(expected_ms).enumerate() {
            assert_eq!(*got, Duration::from_millis(ms), "attempt {}", i + 1);
        }
    }

    #[test]
    fn test_custom_parameters() {
        let p = BackoffPolicy::new()
            .with_factor(3)
            .with_interval(Duration::from_millis(50))
            .with_max_interval(Duration::from_secs(10));
        let sleeps = generate(8, &p);
        let expected_ms = [50, 150, 450, 1_350, 4_050, 10_000, 10_000, 10_000];
        for (i, (got, ms)) in sleeps.iter().zip(expected_ms).enumerate() {
            assert_eq!(*got, Duration::from_millis(ms), "attempt {}", i + 1);
        }
    }

    #[test]
    fn test_first_attempt_ignores_previous() {
        let p = BackoffPolicy::new();
        assert_eq!(
            p.sleep_duration(1, Duration::from_secs(40)),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_non_decreasing_and_exact_cap() {
        let p = BackoffPolicy::new()
            .with_interval(Duration::from_millis(7))
            .with_max_interval(Duration::from_millis(1_000));
        let sleeps = generate(30, &p);
        for pair in sleeps.windows(2) {
            assert!(pair[1] >= pair[0], "{:?} then {:?}", pair[0], pair[1]);
        }
        let first_cap = sleeps
            .iter()
            .position(|d| *d == Duration::from_millis(1_000))
            .expect("sequence must reach the cap");
        assert!(sleeps[first_cap..]
            .iter()
            .all(|d| *d == Duration::from_millis(1_000)));
    }

    #[test]
    fn test_overflow_clamps_to_max() {
        let p = BackoffPolicy::new()
            .with_factor(u32::MAX)
            .with_max_interval(Duration::from_secs(5));
        assert_eq!(p.sleep_duration(2, Duration::MAX), Duration::from_secs(5));
    }

    #[test]
    fn test_factor_one_is_constant() {
        let p = BackoffPolicy::new()
            .with_factor(1)
            .with_interval(Duration::from_millis(500));
        let sleeps = generate(10, &p);
        assert!(sleeps.iter().all(|d| *d == Duration::from_millis(500)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_deadline_is_two_minutes() {
        let p = BackoffPolicy::new();
        tokio::time::advance(Duration::from_secs(119)).await;
        assert!(p.should_continue());
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!p.should_continue());
    }
}
