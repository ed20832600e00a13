//! # In-order event delivery to multiple subscribers.
//!
//! Provides [`SubscriberSet`], which hands every event to each subscriber in registration order.
//!
//! ## Architecture
//! ```text
//! emit(event)
//!     │
//!     ├──► subscriber1.on_event() ──► panic → SubscriberPanicked to the others
//!     ├──► subscriber2.on_event()
//!     └──► subscriberN.on_event()
//! ```
//!
//! ## Rules
//! - **Per-subscriber FIFO**: each subscriber sees events in publish order
//! - **Isolation**: a panicking subscriber doesn't stop delivery to the others
//! - **No recursion**: a panic while handling `SubscriberPanicked` is swallowed
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a subscriber uses `Arc<Mutex<T>>` and panics while holding the lock.

use std::sync::Arc;

use futures::FutureExt;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Ordered collection of subscribers with panic isolation.
#[derive(Clone, Default)]
pub struct SubscriberSet {
    subs: Vec<Arc<dyn Subscribe>>,
}

impl SubscriberSet {
    /// Creates a set from the given subscribers.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs }
    }

    /// Appends a subscriber.
    pub fn push(&mut self, sub: Arc<dyn Subscribe>) {
        self.subs.push(sub);
    }

    /// Returns `true` when no subscriber is attached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Number of attached subscribers.
    #[inline]
    pub fn len(&self) -> usize {
        self.subs.len()
    }

    /// Delivers `event` to every subscriber.
    ///
    /// A panic in one subscriber is converted into a `SubscriberPanicked` event
    /// delivered to all the other subscribers.
    pub async fn emit(&self, event: &Event) {
        for (idx, sub) in self.subs.iter().enumerate() {
            let fut = sub.on_event(event);
            if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                if matches!(event.kind, EventKind::SubscriberPanicked) {
                    continue;
                }
                let info = panic_message(&*panic_err);
                let report = Event::subscriber_panicked(sub.name(), info);
                self.emit_except(idx, &report).await;
            }
        }
    }

    async fn emit_except(&self, skip: usize, event: &Event) {
        for (idx, sub) in self.subs.iter().enumerate() {
            if idx == skip {
                continue;
            }
            let _ = std::panic::AssertUnwindSafe(sub.on_event(event))
                .catch_unwind()
                .await;
        }
    }
}

fn panic_message(any: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
