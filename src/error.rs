//! Error types used by the retry engine.
//!
//! This module defines two error enums:
//!
//! - [`RetryError`]: terminal outcome of a retry session that did not succeed.
//! - [`WaitError`]: outcome of an interrupted [`sleep`](crate::sleep).
//!
//! Both provide `as_label` for logs/metrics; [`RetryError`] also provides `as_message`.

use thiserror::Error;

/// # Errors produced by a retry session.
///
/// `E` is the error type of the wrapped operation.
///
/// - [`RetryError::Canceled`] the cancellation token fired; never retried.
/// - [`RetryError::Exhausted`] the policy deadline passed; carries the last operation error verbatim.
/// - [`RetryError::NotAttempted`] the deadline had passed before the first attempt.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RetryError<E> {
    /// Cancellation was observed during a wait or at a checkpoint.
    #[error("context cancelled")]
    Canceled,

    /// The policy stopped the session after at least one failed attempt.
    #[error("retries exhausted after {attempts} attempt(s): {source}")]
    Exhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The error returned by the last attempt.
        #[source]
        source: E,
    },

    /// The deadline had already passed, so the operation never ran.
    #[error("deadline passed before the first attempt")]
    NotAttempted,
}

impl<E> RetryError<E> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use retryvisor::RetryError;
    ///
    /// let err: RetryError<std::io::Error> = RetryError::Canceled;
    /// assert_eq!(err.as_label(), "retry_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryError::Canceled => "retry_canceled",
            RetryError::Exhausted { .. } => "retry_exhausted",
            RetryError::NotAttempted => "retry_not_attempted",
        }
    }

    /// Indicates whether the session ended because of the cancellation token.
    pub fn is_canceled(&self) -> bool {
        matches!(self, RetryError::Canceled)
    }

    /// Number of attempts made before giving up (`0` unless exhausted).
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
            RetryError::Canceled | RetryError::NotAttempted => 0,
        }
    }

    /// Borrows the last operation error, if any.
    pub fn operation_error(&self) -> Option<&E> {
        match self {
            RetryError::Exhausted { source, .. } => Some(source),
            RetryError::Canceled | RetryError::NotAttempted => None,
        }
    }

    /// Consumes the error and returns the last operation error, if any.
    ///
    /// # Example
    /// ```
    /// use retryvisor::RetryError;
    ///
    /// let err = RetryError::Exhausted { attempts: 3, source: "boom" };
    /// assert_eq!(err.into_operation_error(), Some("boom"));
    /// ```
    pub fn into_operation_error(self) -> Option<E> {
        match self {
            RetryError::Exhausted { source, .. } => Some(source),
            RetryError::Canceled | RetryError::NotAttempted => None,
        }
    }
}

impl<E: std::fmt::Display> RetryError<E> {
    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RetryError::Canceled => "context cancelled".to_string(),
            RetryError::Exhausted { attempts, source } => {
                format!("exhausted: attempts={attempts} last_error={source}")
            }
            RetryError::NotAttempted => "not attempted: deadline already passed".to_string(),
        }
    }
}

impl<E> From<WaitError> for RetryError<E> {
    fn from(err: WaitError) -> Self {
        match err {
            WaitError::Canceled => RetryError::Canceled,
        }
    }
}

/// # Errors produced by the cancellable wait.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitError {
    /// The token was cancelled before the timer fired.
    #[error("context cancelled")]
    Canceled,
}

impl WaitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            WaitError::Canceled => "wait_canceled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, Error)]
    #[error("some error")]
    struct SomeError;

    #[test]
    fn test_exhausted_keeps_source() {
        let err = RetryError::Exhausted {
            attempts: 4,
            source: SomeError,
        };
        assert_eq!(err.attempts(), 4);
        assert_eq!(err.as_label(), "retry_exhausted");
        assert_eq!(err.to_string(), "retries exhausted after 4 attempt(s): some error");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("some error"));
        assert!(err.operation_error().is_some());
    }

    #[test]
    fn test_canceled_has_no_operation_error() {
        let err: RetryError<SomeError> = WaitError::Canceled.into();
        assert!(err.is_canceled());
        assert_eq!(err.attempts(), 0);
        assert!(err.into_operation_error().is_none());
    }

    #[test]
    fn test_messages() {
        let err: RetryError<SomeError> = RetryError::NotAttempted;
        assert_eq!(err.as_label(), "retry_not_attempted");
        assert_eq!(err.as_message(), "not attempted: deadline already passed");
        assert_eq!(WaitError::Canceled.as_label(), "wait_canceled");
    }
}
