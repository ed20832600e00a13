//! # Retry policy contract.
//!
//! [`RetryPolicy`] is the extension point of the engine: it decides how long to wait
//! between attempts and whether another attempt may start at all.
//!
//! Implementors only own a [`PolicyConfig`] and hand it out through
//! [`config`](RetryPolicy::config) / [`config_mut`](RetryPolicy::config_mut).
//! The deadline check and the fluent `with_*` mutators are provided methods, so they
//! always reach the concrete [`sleep_duration`](RetryPolicy::sleep_duration) override.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{PolicyConfig, RetryPolicy};
//!
//! /// Waits `interval` plus 2s per failed attempt.
//! struct Stepped {
//!     config: PolicyConfig,
//! }
//!
//! impl RetryPolicy for Stepped {
//!     fn config(&self) -> &PolicyConfig { &self.config }
//!     fn config_mut(&mut self) -> &mut PolicyConfig { &mut self.config }
//!
//!     fn sleep_duration(&self, attempt: u32, _previous: Duration) -> Duration {
//!         self.config.interval + Duration::from_secs(2) * attempt
//!     }
//! }
//!
//! let p = Stepped { config: PolicyConfig::default() }.with_interval(Duration::from_secs(1));
//! assert_eq!(p.sleep_duration(1, Duration::ZERO), Duration::from_secs(3));
//! assert_eq!(p.sleep_duration(2, Duration::ZERO), Duration::from_secs(5));
//! ```

use std::time::Duration;

use crate::policies::config::PolicyConfig;

/// Strategy governing inter-attempt delays and the overall stop condition.
///
/// ### Rules
/// - `sleep_duration` must not read the clock; it is a function of its arguments and config.
/// - `should_continue` is re-evaluated on every loop pass and may be called any number of times.
/// - The engine only borrows the policy; it never calls the mutators.
///
/// The `with_*` mutators require `Self: Sized`; for trait objects use the `set_*`
/// methods on [`config_mut`](RetryPolicy::config_mut).
pub trait RetryPolicy {
    /// Shared configuration of this policy.
    fn config(&self) -> &PolicyConfig;

    /// Mutable access to the shared configuration.
    fn config_mut(&mut self) -> &mut PolicyConfig;

    /// Computes the delay before the next attempt.
    ///
    /// - `attempt`: number of the attempt that just failed (1-based)
    /// - `previous`: delay actually waited before that attempt (`Duration::ZERO` before the first)
    ///
    /// The provided implementation returns the configured interval.
    fn sleep_duration(&self, attempt: u32, previous: Duration) -> Duration {
        let _ = (attempt, previous);
        self.config().interval
    }

    /// Returns `true` while the current time is strictly before the deadline.
    fn should_continue(&self) -> bool {
        self.config().is_before_deadline()
    }

    /// Sets the growth factor.
    fn with_factor(mut self, factor: u32) -> Self
    where
        Self: Sized,
    {
        self.config_mut().set_factor(factor);
        self
    }

    /// Sets the base interval.
    fn with_interval(mut self, interval: Duration) -> Self
    where
        Self: Sized,
    {
        self.config_mut().set_interval(interval);
        self
    }

    /// Sets the interval cap.
    fn with_max_interval(mut self, max_interval: Duration) -> Self
    where
        Self: Sized,
    {
        self.config_mut().set_max_interval(max_interval);
        self
    }

    /// Resets the deadline to `now + timeout`, measured when this is called.
    fn with_timeout(mut self, timeout: Duration) -> Self
    where
        Self: Sized,
    {
        self.config_mut().set_timeout(timeout);
        self
    }
}

impl<P: RetryPolicy + ?Sized> RetryPolicy for Box<P> {
    fn config(&self) -> &PolicyConfig {
        (**self).config()
    }

    fn config_mut(&mut self) -> &mut PolicyConfig {
        (**self).config_mut()
    }

    fn sleep_duration(&self, attempt: u32, previous: Duration) -> Duration {
        (**self).sleep_duration(attempt, previous)
    }

    fn should_continue(&self) -> bool {
        (**self).should_continue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fallback {
        config: PolicyConfig,
    }

    impl RetryPolicy for Fallback {
        fn config(&self) -> &PolicyConfig {
            &self.config
        }

        fn config_mut(&mut self) -> &mut PolicyConfig {
            &mut self.config
        }
    }

    struct Doubling {
        config: PolicyConfig,
    }

    impl RetryPolicy for Doubling {
        fn config(&self) -> &PolicyConfig {
            &self.config
        }

        fn config_mut(&mut self) -> &mut PolicyConfig {
            &mut self.config
        }

        fn sleep_duration(&self, _attempt: u32, previous: Duration) -> Duration {
            previous * 2
        }
    }

    #[test]
    fn test_default_sleep_is_interval() {
        let p = Fallback {
            config: PolicyConfig::default(),
        }
        .with_interval(Duration::from_millis(250));
        assert_eq!(p.sleep_duration(1, Duration::ZERO), Duration::from_millis(250));
        assert_eq!(p.sleep_duration(9, Duration::from_secs(3)), Duration::from_millis(250));
    }

    #[test]
    fn test_dyn_dispatch_reaches_override() {
        let boxed: Box<dyn RetryPolicy> = Box::new(Doubling {
            config: PolicyConfig::default(),
        });
        assert_eq!(
            boxed.sleep_duration(2, Duration::from_millis(30)),
            Duration::from_millis(60)
        );
        assert!(boxed.should_continue());
    }

    #[test]
    fn test_set_through_trait_object() {
        let mut boxed: Box<dyn RetryPolicy> = Box::new(Fallback {
            config: PolicyConfig::default(),
        });
        boxed.config_mut().set_interval(Duration::from_millis(5));
        assert_eq!(boxed.sleep_duration(1, Duration::ZERO), Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_resets_deadline() {
        let p = Fallback {
            config: PolicyConfig::default(),
        }
        .with_timeout(Duration::from_millis(10));
        assert!(p.should_continue());

        tokio::time::advance(Duration::from_millis(10)).await;
        assert!(!p.should_continue());

        let p = p.with_timeout(Duration::from_millis(10));
        assert!(p.should_continue());
    }
}
