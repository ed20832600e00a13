//! # Event subscribers for retry sessions.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] used by the
//! engine to deliver events, and the optional built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Retrier::run ── emit(Event) ──► SubscriberSet ──► Subscribe::on_event(&Event)
//!                                                        │
//!                                                   ┌────┴────┬─────────┐
//!                                                   ▼         ▼         ▼
//!                                                LogWriter  Metrics  Custom
//! ```
//!
//! Nothing is emitted when no subscriber is attached.

#[cfg(feature = "logging")]
mod log;
mod subscriber;
mod subscriber_set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscriber::Subscribe;
pub use subscriber_set::SubscriberSet;
