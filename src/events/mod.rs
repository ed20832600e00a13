//! Retry events.
//!
//! This module holds the event **data model** published by the retry engine to
//! attached subscribers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//!
//! ## Quick reference
//! - **Publisher**: `engine::Retrier::run` (one event per lifecycle step)
//! - **Consumers**: [`Subscribe`](crate::Subscribe) implementations via [`SubscriberSet`](crate::SubscriberSet)

mod event;

pub use event::{Event, EventKind};
