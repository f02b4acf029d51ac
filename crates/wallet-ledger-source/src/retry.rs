//! Bounded retry with linear backoff for source reads

use std::future::Future;
use std::time::Duration;

/// Run `op` up to `max_attempts` times, sleeping `delay * attempt` between
/// attempts. Errors for which `should_retry` returns false end the loop early.
pub async fn with_retry<T, E, F, Fut, R>(
    max_attempts: u32,
    delay: Duration,
    should_retry: R,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    R: Fn(&E) -> bool,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && should_retry(&err) => {
                log::warn!(
                    target: "wallet_ledger::source",
                    "attempt {}/{} failed: {}; retrying",
                    attempt,
                    max_attempts,
                    err
                );
                tokio::time::sleep(delay * attempt).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
