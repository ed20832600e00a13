//! # Shared policy configuration.
//!
//! Provides [`PolicyConfig`] the state every retry policy carries:
//! base interval, interval cap, growth factor and the session deadline.
//!
//! Concrete policies own a `PolicyConfig` and expose it through
//! [`RetryPolicy::config`](crate::RetryPolicy::config), so the deadline check and the
//! setters below are written once and reused by every policy.
//!
//! ## Deadline semantics
//! - The deadline is an **absolute** [`Instant`], not a duration.
//! - [`PolicyConfig::set_timeout`] recomputes it as `now + timeout` at call time;
//!   calling it again replaces the previous deadline (not cumulative).
//! - [`Instant`] is `tokio::time::Instant`, so a paused test clock drives it too.

use std::time::Duration;

use tokio::time::Instant;

/// Configuration shared by all retry policies.
///
/// ## Field semantics
/// - `interval`: base delay between attempts
/// - `max_interval`: upper bound for computed delays (`>= interval` expected, not enforced)
/// - `factor`: multiplier used by growth-based policies (ignored by constant ones)
/// - `deadline`: absolute point after which retrying stops
///
/// ## Notes
/// Setters mutate in place. Build a fresh config per retry session you want isolated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Base delay between attempts.
    pub interval: Duration,
    /// Upper bound applied to computed delays.
    pub max_interval: Duration,
    /// Multiplicative growth factor for backoff policies.
    pub factor: u32,
    /// Absolute time after which retrying stops.
    pub deadline: Instant,
}

impl PolicyConfig {
    /// Creates a config whose deadline is `now + timeout`.
    pub fn new(interval: Duration, max_interval: Duration, factor: u32, timeout: Duration) -> Self {
        Self {
            interval,
            max_interval,
            factor,
            deadline: deadline_after(timeout),
        }
    }

    /// Returns `true` while the current time is strictly before the deadline.
    #[inline]
    pub fn is_before_deadline(&self) -> bool {
        Instant::now() < self.deadline
    }

    /// Returns the time left until the deadline (`Duration::ZERO` once it has passed).
    #[inline]
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Sets the growth factor.
    pub fn set_factor(&mut self, factor: u32) -> &mut Self {
        self.factor = factor;
        self
    }

    /// Sets the base interval.
    pub fn set_interval(&mut self, interval: Duration) -> &mut Self {
        self.interval = interval;
        self
    }

    /// Sets the interval cap.
    pub fn set_max_interval(&mut self, max_interval: Duration) -> &mut Self {
        self.max_interval = max_interval;
        self
    }

    /// Resets the deadline to `now + timeout`.
    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.deadline = deadline_after(timeout);
        self
    }
}

impl Default for PolicyConfig {
    /// Constant-policy defaults:
    ///
    /// - `interval = max_interval = 1s`
    /// - `factor = 1`
    /// - `deadline = now + 30s`
    fn default() -> Self {
        Self::new(
            super::constant::DEFAULT_INTERVAL,
            super::constant::DEFAULT_INTERVAL,
            1,
            super::constant::DEFAULT_TIMEOUT,
        )
    }
}

/// `now + timeout`, saturating far in the future instead of overflowing.
fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout)
        .unwrap_or_else(|| now + Duration::from_secs(86_400 * 365 * 30))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_continue_strictly_before_deadline() {
        let cfg = PolicyConfig::new(
            Duration::from_millis(10),
            Duration::from_millis(10),
            1,
            Duration::from_millis(50),
        );
        assert!(cfg.is_before_deadline());

        tokio::time::advance(Duration::from_millis(49)).await;
        assert!(cfg.is_before_deadline());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!cfg.is_before_deadline(), "deadline itself is not before");
        assert_eq!(cfg.remaining(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_timeout_is_relative_to_call_time() {
        let mut cfg = PolicyConfig::default();
        cfg.set_timeout(Duration::from_millis(100));

        tokio::time::advance(Duration::from_millis(80)).await;
        cfg.set_timeout(Duration::from_millis(100));

        tokio::time::advance(Duration::from_millis(80)).await;
        assert!(cfg.is_before_deadline(), "second call must not stack on the first");
        assert_eq!(cfg.remaining(), Duration::from_millis(20));
    }

    #[test]
    fn test_setters_touch_one_field() {
        let mut cfg = PolicyConfig::default();
        let before = cfg;
        cfg.set_factor(5);
        assert_eq!(cfg.factor, 5);
        assert_eq!(cfg.interval, before.interval);
        assert_eq!(cfg.max_interval, before.max_interval);
        assert_eq!(cfg.deadline, before.deadline);

        cfg.set_interval(Duration::from_millis(7))
            .set_max_interval(Duration::from_millis(70));
        assert_eq!(cfg.interval, Duration::from_millis(7));
        assert_eq!(cfg.max_interval, Duration::from_millis(70));
        assert_eq!(cfg.deadline, before.deadline);
    }

    #[test]
    fn test_huge_timeout_does_not_overflow() {
        let cfg = PolicyConfig::new(Duration::ZERO, Duration::ZERO, 1, Duration::MAX);
        assert!(cfg.is_before_deadline());
    }
}
