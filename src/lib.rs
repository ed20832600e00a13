//! # retryvisor
//!
//! **Retryvisor** is a small, deadline-driven retry engine for async Rust.
//!
//! It repeatedly invokes a fallible operation until it succeeds, a
//! [`CancellationToken`](tokio_util::sync::CancellationToken) fires, or the deadline
//! of a pluggable [`RetryPolicy`] passes.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ConstantPolicy│   │BackoffPolicy │   │ custom policy│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            └─────────┬────────┴──────────────────┘
//!                      ▼ owns
//!              ┌──────────────┐
//!              │ PolicyConfig │ interval / max_interval / factor / deadline
//!              └──────┬───────┘
//!                     ▼ &dyn RetryPolicy (borrowed, never mutated)
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Retrier (retry loop)                                             │
//! │  - should_continue()  → keep going while before the deadline      │
//! │  - sleep_duration()   → delay after each failed attempt           │
//! │  - sleep(token, d)    → cancellable wait                          │
//! └──────┬───────────────────────────────────────────────────┬───────┘
//!        ▼                                                   ▼
//!   operation().await                           SubscriberSet (optional)
//!                                                  ├─► LogWriter
//!                                                  └─► custom Subscribe
//! ```
//!
//! ### Lifecycle
//! ```text
//! policy ──► retry_with(token, op, &policy) ──► Retrier::run()
//!
//! while policy.should_continue() {
//!   ├─► wait pending delay (cancellable)  ── cancelled ─► Err(Canceled)
//!   ├─► token cancelled?                   ── yes ───────► Err(Canceled)
//!   ├─► attempt += 1
//!   ├─► op().await
//!   │       ├─ Ok  ──► Ok(value)
//!   │       └─ Err ──► delay = policy.sleep_duration(attempt, last_delay)
//! }
//! ─► Err(Exhausted { attempts, last error })  or  Err(NotAttempted)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                          |
//! |-------------------|---------------------------------------------------------------|---------------------------------------------|
//! | **Retry loop**    | Retry an async operation under a policy and a cancel token.   | [`retry`], [`retry_with`], [`Retrier`]      |
//! | **Policies**      | Constant and exponential backoff, or your own.                | [`RetryPolicy`], [`ConstantPolicy`], [`BackoffPolicy`] |
//! | **Configuration** | Shared interval / cap / factor / deadline.                    | [`PolicyConfig`]                            |
//! | **Waiting**       | Sleep that a cancellation token can interrupt.                | [`sleep`]                                   |
//! | **Errors**        | Typed outcomes for cancellation and exhaustion.               | [`RetryError`], [`WaitError`]               |
//! | **Subscriber API**| Observe attempts, delays and outcomes.                        | [`Subscribe`], [`Event`], [`EventKind`]     |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use retryvisor::{BackoffPolicy, RetryPolicy, retry_with};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let token = CancellationToken::new();
//!
//!     // 10ms, 20ms, 40ms ... capped at 1s, give up after 5s
//!     let policy = BackoffPolicy::new()
//!         .with_interval(Duration::from_millis(10))
//!         .with_max_interval(Duration::from_secs(1))
//!         .with_timeout(Duration::from_secs(5));
//!
//!     let mut calls = 0;
//!     let value = retry_with(
//!         &token,
//!         || {
//!             calls += 1;
//!             let n = calls;
//!             async move {
//!                 if n < 3 {
//!                     Err(std::io::Error::other(format!("attempt {n} failed")))
//!                 } else {
//!                     Ok(n)
//!                 }
//!             }
//!         },
//!         &policy,
//!     )
//!     .await?;
//!
//!     assert_eq!(value, 3);
//!     Ok(())
//! }
//! ```
mod engine;
mod error;
mod events;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use engine::{Retrier, retry, retry_with, sleep};
pub use error::{RetryError, WaitError};
pub use events::{Event, EventKind};
pub use policies::{BackoffPolicy, ConstantPolicy, PolicyConfig, RetryPolicy};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
