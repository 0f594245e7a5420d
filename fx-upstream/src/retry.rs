//! Retry helper for outbound calls.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Runs `operation` up to `retries + 1` times, sleeping `delay` between
/// attempts. Only errors returned by the operation are retried, so callers
/// decide what counts as retryable by what they surface as `Err`.
pub async fn with_retry<F, Fut, T, E>(
    mut operation: F,
    retries: usize,
    delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) => {
                if attempt > retries {
                    return Err(err);
                }
                debug!(
                    "Attempt {}/{} failed: {}. Retrying...",
                    attempt,
                    retries + 1,
                    err
                );
                attempt += 1;
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_no_retries_means_single_attempt() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result: Result<(), String> = with_retry(
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err("down".to_string())
            },
            0,
            Duration::from_millis(1),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failure() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result: Result<u32, String> = with_retry(
            move || async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err("blip".to_string())
                } else {
                    Ok(7)
                }
            },
            2,
            Duration::from_millis(1),
        )
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
