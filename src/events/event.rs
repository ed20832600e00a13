//! # Events emitted during a retry session.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Attempt events**: attempt starting / failed, backoff scheduled
//! - **Terminal events**: succeeded, canceled, exhausted, not attempted
//! - **Subscriber events**: a subscriber panicked while handling an event
//!
//! The [`Event`] struct carries metadata such as timestamps, operation name,
//! attempt number, reasons and backoff delays.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::BackoffScheduled)
//!     .with_operation("fetch")
//!     .with_attempt(2)
//!     .with_delay(Duration::from_millis(200))
//!     .with_reason("connection refused");
//!
//! assert_eq!(ev.kind, EventKind::BackoffScheduled);
//! assert_eq!(ev.operation.as_deref(), Some("fetch"));
//! assert_eq!(ev.delay_ms, Some(200));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of retry events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Attempt events ===
    /// An attempt is about to invoke the operation.
    ///
    /// Sets:
    /// - `operation`: operation name (if the retrier has one)
    /// - `attempt`: attempt number (1-based)
    AttemptStarting,

    /// The operation returned an error for this attempt.
    ///
    /// Sets:
    /// - `attempt`: attempt number
    /// - `reason`: error message
    AttemptFailed,

    /// The next attempt is scheduled after a delay.
    ///
    /// Sets:
    /// - `attempt`: the attempt that just failed
    /// - `delay_ms`: delay before the next attempt (ms)
    /// - `reason`: last failure message
    BackoffScheduled,

    // === Terminal events ===
    /// The operation succeeded; the session is over.
    ///
    /// Sets:
    /// - `attempt`: the successful attempt number
    Succeeded,

    /// The cancellation token fired; the session is over.
    ///
    /// Sets:
    /// - `attempt`: attempts made so far
    Canceled,

    /// The policy deadline passed without a success.
    ///
    /// Sets:
    /// - `attempt`: attempts made
    /// - `reason`: last failure message
    Exhausted,

    /// The deadline had passed before the first attempt.
    NotAttempted,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `operation`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,
}

impl EventKind {
    /// Returns a short stable label (kebab-case) for log lines.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::AttemptStarting => "starting",
            EventKind::AttemptFailed => "failed",
            EventKind::BackoffScheduled => "backoff",
            EventKind::Succeeded => "succeeded",
            EventKind::Canceled => "canceled",
            EventKind::Exhausted => "exhausted",
            EventKind::NotAttempted => "not-attempted",
            EventKind::SubscriberPanicked => "subscriber-panicked",
        }
    }

    /// Returns `true` for events that end a retry session.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EventKind::Succeeded
                | EventKind::Canceled
                | EventKind::Exhausted
                | EventKind::NotAttempted
        )
    }
}

/// Retry event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the retried operation, if the retrier was given one.
    pub operation: Option<Arc<str>>,
    /// Attempt count (starting from 1).
    pub attempt: Option<u32>,
    /// Backoff delay before the next attempt in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (errors, panic details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            operation: None,
            attempt: None,
            delay_ms: None,
            reason: None,
        }
    }

    /// Attaches an operation name.
    #[inline]
    pub fn with_operation(mut self, name: impl Into<Arc<str>>) -> Self {
        self.operation = Some(name.into());
        self
    }

    /// Attaches an attempt count.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a backoff delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_operation(subscriber)
            .with_reason(info)
    }

    /// Backoff delay as a [`Duration`], if set.
    #[inline]
    pub fn delay(&self) -> Option<Duration> {
        self.delay_ms.map(|ms| Duration::from_millis(u64::from(ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::AttemptStarting);
        let b = Event::new(EventKind::AttemptFailed);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_delay_saturates() {
        let ev = Event::new(EventKind::BackoffScheduled).with_delay(Duration::MAX);
        assert_eq!(ev.delay_ms, Some(u32::MAX));

        let ev = Event::new(EventKind::BackoffScheduled).with_delay(Duration::from_millis(1_500));
        assert_eq!(ev.delay(), Some(Duration::from_millis(1_500)));
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(EventKind::Succeeded.is_terminal());
        assert!(EventKind::Exhausted.is_terminal());
        assert!(!EventKind::BackoffScheduled.is_terminal());
        assert!(!EventKind::SubscriberPanicked.is_terminal());
    }

    #[test]
    fn test_subscriber_panicked() {
        let ev = Event::subscriber_panicked("metrics", "boom".to_string());
        assert_eq!(ev.kind, EventKind::SubscriberPanicked);
        assert_eq!(ev.operation.as_deref(), Some("metrics"));
        assert_eq!(ev.reason.as_deref(), Some("boom"));
    }
}
