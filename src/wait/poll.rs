//! Generic condition polling
//!
//! The boolean-returning contract here is deliberately different from the
//! error-raising waits in [`crate::wait::element`]: polling a custom
//! condition signals expiry through its return value and never errors.

use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Poll a predicate until it holds or the timeout elapses
///
/// The predicate is evaluated at least once, even for a timeout shorter than
/// one interval. Returns `true` as soon as the predicate does; `false` once
/// the elapsed wall-clock time exceeds `timeout` without a success.
pub async fn wait_for_condition<F>(mut predicate: F, timeout: Duration, interval: Duration) -> bool
where
    F: FnMut() -> bool,
{
    let start = Instant::now();
    loop {
        if predicate() {
            debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Condition met");
            return true;
        }
        if start.elapsed() >= timeout {
            warn!(timeout_ms = timeout.as_millis() as u64, "Condition wait expired");
            return false;
        }
        tokio::time::sleep(interval).await;
    }
}

/// [`wait_for_condition`] for predicates that must await the driver
///
/// Same contract: at least one evaluation, `true` on first success, `false`
/// on expiry, no error signalling.
pub async fn wait_for_condition_async<F, Fut>(
    mut predicate: F,
    timeout: Duration,
    interval: Duration,
) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = Instant::now();
    loop {
        if predicate().await {
            debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Condition met");
            return true;
        }
        if start.elapsed() >= timeout {
            warn!(timeout_ms = timeout.as_millis() as u64, "Condition wait expired");
            return false;
        }
        tokio::time::sleep(interval).await;
    }
}
