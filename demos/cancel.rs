//! # Example: cancel
//!
//! Runs an always-failing operation under [`BackoffPolicy`] and cancels the
//! session from a second task, either on Ctrl-C or after 1.5 seconds.
//!
//! ## Flow
//! ```text
//! Retrier::run()
//!   ├─► attempt 1 → Err → backoff 100ms
//!   ├─► attempt 2 → Err → backoff 200ms
//!   ├─► attempt 3 → Err → backoff 400ms
//!   ├─► attempt 4 → Err → backoff 800ms
//!   │       ▲
//!   │       └── token.cancel() at ~1.5s interrupts the wait
//!   └─► Err(Canceled)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example cancel --features logging
//! ```

use std::{sync::Arc, time::Duration};

use retryvisor::{BackoffPolicy, LogWriter, Retrier, RetryError};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => println!("[main] ctrl-c received"),
            _ = tokio::time::sleep(Duration::from_millis(1_500)) => println!("[main] timer fired"),
        }
        canceller.cancel();
    });

    let policy = BackoffPolicy::new();
    let start = Instant::now();

    let res: Result<(), RetryError<std::io::Error>> = Retrier::new(&policy)
        .with_name("unreachable")
        .with_subscriber(Arc::new(LogWriter::new()))
        .run(&token, || async {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))
        })
        .await;

    match res {
        Err(e) if e.is_canceled() => println!("[main] canceled after {:?}", start.elapsed()),
        other => println!("[main] unexpected outcome: {other:?}"),
    }
}
