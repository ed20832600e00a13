//! Retry engine internals.
//!
//! ## Contents
//! - `retrier` the retry loop ([`Retrier`], [`retry`], [`retry_with`])
//! - `wait`    the cancellable wait ([`sleep`])
//!
//! ## Wiring
//! ```text
//! retry(token, op) ──► ConstantPolicy::new() ──┐
//! retry_with(token, op, &policy) ──────────────┼──► Retrier::run
//!                                              │      ├─► policy.should_continue()
//!                                              │      ├─► wait::sleep(token, delay)
//!                                              │      ├─► op().await
//!                                              │      └─► SubscriberSet::emit(Event)
//! ```

mod retrier;
mod wait;

pub use retrier::{Retrier, retry, retry_with};
pub use wait::sleep;
