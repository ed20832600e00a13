//! # LogWriter: simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [starting] op="fetch" attempt=1
//! [failed] op="fetch" attempt=1 err="connection refused"
//! [backoff] op="fetch" delay=100ms after_attempt=1 err="connection refused"
//! [starting] op="fetch" attempt=2
//! [succeeded] op="fetch" attempt=2
//! [exhausted] op="fetch" attempts=5 err="connection refused"
//! [canceled] op="fetch" attempts=3
//! ```

use std::time::Duration;

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Renders one event as a single log line (without trailing newline).
pub(crate) fn format_event(e: &Event) -> String {
    let op = e.operation.as_deref().unwrap_or("-");
    let attempt = e.attempt.unwrap_or(0);
    let err = e.reason.as_deref().unwrap_or("");
    let label = e.kind.as_label();

    match e.kind {
        EventKind::AttemptStarting | EventKind::Succeeded => {
            format!("[{label}] op={op:?} attempt={attempt}")
        }
        EventKind::AttemptFailed => {
            format!("[{label}] op={op:?} attempt={attempt} err={err:?}")
        }
        EventKind::BackoffScheduled => {
            let delay = e.delay().unwrap_or(Duration::ZERO);
            format!("[{label}] op={op:?} delay={delay:?} after_attempt={attempt} err={err:?}")
        }
        EventKind::Exhausted => {
            format!("[{label}] op={op:?} attempts={attempt} err={err:?}")
        }
        EventKind::Canceled => format!("[{label}] op={op:?} attempts={attempt}"),
        EventKind::NotAttempted => format!("[{label}] op={op:?}"),
        EventKind::SubscriberPanicked => {
            format!("[{label}] subscriber={op} info={err}")
        }
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        println!("{}", format_event(e));
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_line() {
        let ev = Event::new(EventKind::BackoffScheduled)
            .with_operation("fetch")
            .with_attempt(1)
            .with_delay(Duration::from_millis(100))
            .with_reason("connection refused");
        assert_eq!(
            format_event(&ev),
            r#"[backoff] op="fetch" delay=100ms after_attempt=1 err="connection refused""#
        );
    }

    #[test]
    fn test_unnamed_operation() {
        let ev = Event::new(EventKind::AttemptStarting).with_attempt(3);
        assert_eq!(format_event(&ev), r#"[starting] op="-" attempt=3"#);
    }

    #[test]
    fn test_terminal_lines() {
        let ev = Event::new(EventKind::Exhausted)
            .with_operation("fetch")
            .with_attempt(5)
            .with_reason("boom");
        assert_eq!(format_event(&ev), r#"[exhausted] op="fetch" attempts=5 err="boom""#);

        let ev = Event::new(EventKind::NotAttempted).with_operation("fetch");
        assert_eq!(format_event(&ev), r#"[not-attempted] op="fetch""#);
    }
}
