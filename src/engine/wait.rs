//! # Cancellable wait.
//!
//! [`sleep`] suspends the caller for a duration **or** until a [`CancellationToken`]
//! fires, whichever comes first. It is the only suspension point of a retry session.
//!
//! ## Rules
//! - Timer wins → `Ok(())`
//! - Token wins → `Err(WaitError::Canceled)`
//! - Both ready on the same poll → cancellation wins
//! - The timer is dropped on every exit path (no lingering timer entries)

use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::error::WaitError;

/// Pauses until `duration` has passed or `token` is cancelled.
///
/// An already-cancelled token returns immediately, even for a zero duration.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use retryvisor::{WaitError, sleep};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let token = CancellationToken::new();
/// assert_eq!(sleep(&token, Duration::from_millis(1)).await, Ok(()));
///
/// token.cancel();
/// assert_eq!(sleep(&token, Duration::from_secs(60)).await, Err(WaitError::Canceled));
/// # }
/// ```
pub async fn sleep(token: &CancellationToken, duration: Duration) -> Result<(), WaitError> {
    let timer = time::sleep(duration);
    tokio::pin!(timer);

    select! {
        biased;
        _ = token.cancelled() => Err(WaitError::Canceled),
        _ = &mut timer => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_timer_wins() {
        let token = CancellationToken::new();
        let start = Instant::now();

        assert_eq!(sleep(&token, Duration::from_millis(20)).await, Ok(()));
        assert_eq!(start.elapsed(), Duration::from_millis(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_wait() {
        let token = CancellationToken::new();
        let start = Instant::now();

        let canceller = token.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let res = sleep(&token, Duration::from_millis(20)).await;
        assert_eq!(res, Err(WaitError::Canceled));
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(10), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(20), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_returns_immediately() {
        let token = CancellationToken::new();
        token.cancel();
        let start = Instant::now();

        assert_eq!(sleep(&token, Duration::ZERO).await, Err(WaitError::Canceled));
        assert_eq!(sleep(&token, Duration::from_secs(3600)).await, Err(WaitError::Canceled));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_child_token_follows_parent() {
        let parent = CancellationToken::new();
        let child = parent.child_token();

        let canceller = parent.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(5)).await;
            canceller.cancel();
        });

        assert_eq!(
            sleep(&child, Duration::from_secs(1)).await,
            Err(WaitError::Canceled)
        );
    }
}
