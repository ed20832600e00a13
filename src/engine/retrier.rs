//! # Retrier: the retry loop.
//!
//! Drives one fallible operation under a [`RetryPolicy`]:
//! - delays per [`RetryPolicy::sleep_duration`],
//! - stop condition per [`RetryPolicy::should_continue`],
//! - cooperative cancellation via [`CancellationToken`].
//!
//! ## Architecture
//! ```text
//! retry / retry_with ──► Retrier::run()
//!
//! while policy.should_continue() {
//!   ├─► if to_sleep > 0:
//!   │     ├─► publish BackoffScheduled
//!   │     └─► sleep(to_sleep) (cancellable) ── cancelled ─► Canceled
//!   │   else (after a failure): yield_now()
//!   ├─► token cancelled? ──────────────────────────────────► Canceled
//!   ├─► attempt += 1, publish AttemptStarting
//!   ├─► operation().await
//!   │       ├─ Ok  ──► publish Succeeded ─► return value
//!   │       └─ Err ──► publish AttemptFailed
//!   │                  to_sleep = policy.sleep_duration(attempt, last_sleep)
//! }
//! ─► Exhausted { last error }   (or NotAttempted if the loop never ran)
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially**; the operation is never polled concurrently with itself.
//! - The attempt counter and last sleep are **local to one call**; nothing is shared across calls.
//! - The policy is only **borrowed**; its configuration is never modified by the loop.
//! - Cancellation is checked at **safe points** (before attempting, during the wait);
//!   a running attempt is not interrupted.
//! - Every retry passes through a **suspension point**: a zero delay yields to the
//!   scheduler so other tasks (including whoever cancels the token) can run.

use std::{fmt::Display, future::Future, sync::Arc, time::Duration};

use tokio_util::sync::CancellationToken;

use crate::{
    engine::wait,
    error::RetryError,
    events::{Event, EventKind},
    policies::{ConstantPolicy, RetryPolicy},
    subscribers::{Subscribe, SubscriberSet},
};

/// Runs `operation` until it succeeds, `token` is cancelled, or a default
/// [`ConstantPolicy`] (1s interval, 30s deadline) gives up.
///
/// # Example
/// ```rust
/// use tokio_util::sync::CancellationToken;
/// use retryvisor::retry;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let token = CancellationToken::new();
/// let answer = retry(&token, || async { Ok::<_, std::io::Error>(42) }).await;
/// assert_eq!(answer.unwrap(), 42);
/// # }
/// ```
pub async fn retry<T, E, F, Fut>(
    token: &CancellationToken,
    operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let policy = ConstantPolicy::new();
    retry_with(token, operation, &policy).await
}

/// Runs `operation` under `policy` until it succeeds, `token` is cancelled, or
/// the policy deadline passes.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use retryvisor::{BackoffPolicy, RetryError, RetryPolicy, retry_with};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let token = CancellationToken::new();
/// let policy = BackoffPolicy::new()
///     .with_interval(Duration::from_millis(1))
///     .with_timeout(Duration::from_millis(20));
///
/// let res: Result<(), _> = retry_with(&token, || async { Err("unreachable host") }, &policy).await;
/// assert!(matches!(res, Err(RetryError::Exhausted { source: "unreachable host", .. })));
/// # }
/// ```
pub async fn retry_with<P, T, E, F, Fut>(
    token: &CancellationToken,
    operation: F,
    policy: &P,
) -> Result<T, RetryError<E>>
where
    P: RetryPolicy + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    Retrier::new(policy).run(token, operation).await
}

/// Retry engine bound to one policy, with optional name and subscribers.
///
/// ### Responsibilities
/// - **Execution**: invokes the operation once per attempt
/// - **Scheduling**: asks the policy for the next delay and waits for it
/// - **Graceful cancellation**: stops at safe points when the token fires
/// - **Event publishing**: reports lifecycle events to attached subscribers
///
/// A `Retrier` can be reused for many sessions; each [`run`](Retrier::run) starts
/// from attempt 0. The policy deadline is absolute, so a later session sees
/// whatever time is left.
pub struct Retrier<'p, P: ?Sized> {
    policy: &'p P,
    name: Option<Arc<str>>,
    subscribers: SubscriberSet,
}

impl<'p, P: RetryPolicy + ?Sized> Retrier<'p, P> {
    /// Creates a retrier borrowing `policy`.
    pub fn new(policy: &'p P) -> Self {
        Self {
            policy,
            name: None,
            subscribers: SubscriberSet::default(),
        }
    }

    /// Names the operation in published events.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches one subscriber.
    #[must_use]
    pub fn with_subscriber(mut self, sub: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(sub);
        self
    }

    /// Attaches several subscribers, in order.
    #[must_use]
    pub fn with_subscribers(mut self, subs: Vec<Arc<dyn Subscribe>>) -> Self {
        for sub in subs {
            self.subscribers.push(sub);
        }
        self
    }

    /// The policy this retrier consults.
    pub fn policy(&self) -> &P {
        self.policy
    }

    /// Runs the retry loop until success, cancellation or policy exhaustion.
    ///
    /// ### Exit conditions
    /// - Operation returns `Ok(v)` → `Ok(v)` (only success exit)
    /// - `token` cancelled during a wait or before an attempt → [`RetryError::Canceled`]
    /// - `should_continue()` turns false after a failure → [`RetryError::Exhausted`]
    ///   carrying the last operation error
    /// - `should_continue()` false before the first attempt → [`RetryError::NotAttempted`]
    ///
    /// ### Backoff semantics
    /// - `sleep_duration` receives the 1-based number of the failed attempt and the
    ///   delay actually waited before it (`Duration::ZERO` before the first attempt)
    /// - A zero delay skips the wait (and `BackoffScheduled`) but still yields to the
    ///   scheduler before the cancellation check; `last_sleep` keeps its previous value
    pub async fn run<T, E, F, Fut>(
        &self,
        token: &CancellationToken,
        mut operation: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt: u32 = 0;
        let mut to_sleep = Duration::ZERO;
        let mut last_sleep = Duration::ZERO;
        let mut last_err: Option<E> = None;

        while self.policy.should_continue() {
            if to_sleep > Duration::ZERO {
                self.publish(|| {
                    self.event(EventKind::BackoffScheduled)
                        .with_attempt(attempt)
                        .with_delay(to_sleep)
                        .with_reason(reason_of(last_err.as_ref()))
                })
                .await;

                if let Err(e) = wait::sleep(token, to_sleep).await {
                    self.publish(|| self.event(EventKind::Canceled).with_attempt(attempt))
                        .await;
                    return Err(e.into());
                }
                last_sleep = to_sleep;
            } else if attempt > 0 {
                tokio::task::yield_now().await;
            }

            if token.is_cancelled() {
                self.publish(|| self.event(EventKind::Canceled).with_attempt(attempt))
                    .await;
                return Err(RetryError::Canceled);
            }

            attempt = attempt.saturating_add(1);
            self.publish(|| self.event(EventKind::AttemptStarting).with_attempt(attempt))
                .await;

            match operation().await {
                Ok(value) => {
                    self.publish(|| self.event(EventKind::Succeeded).with_attempt(attempt))
                        .await;
                    return Ok(value);
                }
                Err(e) => {
                    self.publish(|| {
                        self.event(EventKind::AttemptFailed)
                            .with_attempt(attempt)
                            .with_reason(e.to_string())
                    })
                    .await;
                    to_sleep = self.policy.sleep_duration(attempt, last_sleep);
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(source) => {
                self.publish(|| {
                    self.event(EventKind::Exhausted)
                        .with_attempt(attempt)
                        .with_reason(source.to_string())
                })
                .await;
                Err(RetryError::Exhausted {
                    attempts: attempt,
                    source,
                })
            }
            None => {
                self.publish(|| self.event(EventKind::NotAttempted)).await;
                Err(RetryError::NotAttempted)
            }
        }
    }

    fn event(&self, kind: EventKind) -> Event {
        let ev = Event::new(kind);
        match &self.name {
            Some(name) => ev.with_operation(Arc::clone(name)),
            None => ev,
        }
    }

    /// Builds and emits an event only when someone is listening.
    async fn publish(&self, make: impl FnOnce() -> Event) {
        if self.subscribers.is_empty() {
            return;
        }
        self.subscribers.emit(&make()).await;
    }
}

fn reason_of<E: Display>(err: Option<&E>) -> String {
    err.map(ToString::to_string).unwrap_or_default()
}
