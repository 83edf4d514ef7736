//! Retry with exponential backoff and jitter for the raw shop fallback.
//!
//! Only transient conditions are retried: HTTP 429, HTTP 5xx, timeouts and
//! connection failures. Everything else (4xx, malformed bodies, bad base URL)
//! is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound for a single backoff sleep.
const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors that are worth retrying after a backoff delay.
///
/// **Retriable:**
/// - [`ScraperError::RateLimited`]: HTTP 429.
/// - [`ScraperError::UnexpectedStatus`] with a 5xx status.
/// - [`ScraperError::Http`] for timeouts, connection failures and 5xx.
///
/// **Not retriable:**
/// - [`ScraperError::UnexpectedStatus`] with any other status.
/// - [`ScraperError::Deserialize`]: retrying will not fix the body.
/// - [`ScraperError::InvalidBaseUrl`]: configuration problem.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } => true,
        ScraperError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        ScraperError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ScraperError::Deserialize { .. } | ScraperError::InvalidBaseUrl { .. } => false,
    }
}

/// Computes the sleep before retry number `attempt` (1-based).
///
/// `backoff_base_ms * 2^(attempt-1)` scaled by a random factor in
/// `[0.75, 1.25)`, raised to the server's `Retry-After` when that is longer,
/// and capped at [`MAX_DELAY_MS`].
fn backoff_delay_ms(backoff_base_ms: u64, attempt: u32, err: &ScraperError) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (computed.min(MAX_DELAY_MS) as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;

    let server_hint_ms = match err {
        ScraperError::RateLimited {
            retry_after_secs: Some(secs),
        } => secs.saturating_mul(1_000),
        _ => 0,
    };

    jittered.max(server_hint_ms).min(MAX_DELAY_MS)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 500`:
///
/// | Attempt | Sleep before next attempt    |
/// |---------|------------------------------|
/// | 1       | 500 ms × 2⁰ ± 25 % jitter    |
/// | 2       | 500 ms × 2¹ ± 25 % jitter    |
/// | 3       | 500 ms × 2² ± 25 % jitter    |
///
/// With `max_retries = 3` the operation is attempted at most 4 times total.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = backoff_delay_ms(backoff_base_ms, attempt, &err);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient upstream error, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
