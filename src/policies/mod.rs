//! Retry policies.
//!
//! This module groups the knobs that control **how long** to wait between attempts
//! and **until when** a retry session may keep going.
//!
//! ## Contents
//! - [`RetryPolicy`]    the contract the engine consumes (delay + stop condition)
//! - [`PolicyConfig`]   shared state: interval / max_interval / factor / deadline
//! - [`ConstantPolicy`] fixed delay (engine default)
//! - [`BackoffPolicy`]  delay multiplied by `factor` per attempt, capped at `max_interval`
//!
//! ## Quick wiring
//! ```text
//! ConstantPolicy / BackoffPolicy / custom ──► owns PolicyConfig
//!      └─► engine::Retrier uses:
//!           - should_continue() to decide whether to attempt again
//!           - sleep_duration(attempt, last_sleep) to schedule the next attempt
//! ```
//!
//! ## Defaults
//! - `ConstantPolicy::new()` → interval=1s, timeout=30s.
//! - `BackoffPolicy::new()`  → interval=100ms, factor=2, max=60s, timeout=2min.

mod backoff;
mod config;
mod constant;
mod policy;

pub use backoff::BackoffPolicy;
pub use config::PolicyConfig;
pub use constant::ConstantPolicy;
pub use policy::RetryPolicy;
