//! # Example: trace
//!
//! Prints timing traces for three retry sessions:
//! 1. a flaky operation (fails twice, then succeeds) on the default constant policy;
//! 2. an always-failing operation on a constant policy (2s interval, 5s timeout);
//! 3. the flaky operation on a custom policy that grows its delay by 2s per attempt
//!    and counts how many failures it was asked to schedule.
//!
//! ## Flow
//! ```text
//! flaky()   ── Err ──► sleep 1s ── Err ──► sleep 1s ── Ok(42)
//! failing() ── Err ──► sleep 2s ── Err ──► sleep 2s ── Err ──► sleep 2s ── Err ──► deadline (5s)
//! flaky()   ── Err ──► sleep 3s ── Err ──► sleep 5s ── Ok(42)      (custom policy)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example trace --features logging
//! ```

use std::{
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use retryvisor::{
    ConstantPolicy, LogWriter, PolicyConfig, Retrier, RetryPolicy, retry, retry_with,
};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

static ATTEMPTS: AtomicU32 = AtomicU32::new(0);

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct DemoError(&'static str);

/// Fails on the first two attempts, then returns 42.
async fn flaky() -> Result<u32, DemoError> {
    let attempt = ATTEMPTS.fetch_add(1, Ordering::Relaxed) + 1;
    if attempt < 3 {
        println!("[flaky] attempt {attempt} failed");
        return Err(DemoError("overridden error"));
    }
    println!("[flaky] succeeded on attempt {attempt}");
    Ok(42)
}

async fn failing() -> Result<u32, DemoError> {
    println!("[failing] failed, next wait starts now");
    Err(DemoError("expected error"))
}

/// Waits `interval + 2s × attempt` and counts the failures it scheduled.
struct Stepped {
    config: PolicyConfig,
    failures: AtomicU32,
}

impl Stepped {
    fn new() -> Self {
        Self {
            config: PolicyConfig::new(
                Duration::from_secs(1),
                Duration::from_secs(1),
                1,
                Duration::from_secs(10),
            ),
            failures: AtomicU32::new(0),
        }
    }

    fn failures(&self) -> u32 {
        self.failures.load(Ordering::Relaxed)
    }
}

impl RetryPolicy for Stepped {
    fn config(&self) -> &PolicyConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut PolicyConfig {
        &mut self.config
    }

    fn sleep_duration(&self, attempt: u32, _previous: Duration) -> Duration {
        self.failures.fetch_add(1, Ordering::Relaxed);
        self.config
            .interval
            .saturating_add(Duration::from_secs(2).saturating_mul(attempt))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = CancellationToken::new();

    // 1. Default policy (constant, 1s) with a flaky operation
    println!("--- flaky() on default ConstantPolicy ---");
    let value = retry(&token, flaky).await?;
    println!("flaky() returned {value}\n");

    // 2. Constant policy that runs out of time
    println!("--- failing() on ConstantPolicy ---");
    let policy = ConstantPolicy::new()
        .with_interval(Duration::from_secs(2))
        .with_timeout(Duration::from_secs(5));
    let start = Instant::now();
    println!("interval=2s timeout=5s, deadline in {:?}", policy.config().remaining());

    match retry_with(&token, failing, &policy).await {
        Ok(v) => println!("unexpected success: {v}"),
        Err(e) => println!(
            "failing() gave up with {:?} after {:?} ({})",
            e.as_label(),
            start.elapsed(),
            e.as_message()
        ),
    }
    println!();

    // 3. Custom policy, with events printed by LogWriter
    println!("--- flaky() on custom Stepped policy ---");
    ATTEMPTS.store(0, Ordering::Relaxed);
    let custom = Stepped::new();

    // Peek at the schedule before running; this bumps the failure counter, like any caller would.
    let expected = [
        custom.sleep_duration(1, Duration::ZERO),
        custom.sleep_duration(2, Duration::ZERO),
    ];
    println!("expected sleeps: {expected:?}");

    let start = Instant::now();
    let value = Retrier::new(&custom)
        .with_name("flaky")
        .with_subscriber(Arc::new(LogWriter::new()))
        .run(&token, flaky)
        .await?;
    println!(
        "flaky() succeeded with {value} after {:?}; policy scheduled {} delays",
        start.elapsed(),
        custom.failures()
    );

    Ok(())
}
