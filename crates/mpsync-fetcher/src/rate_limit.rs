//! Rate limiting and retry utilities for the catalog client.
//!
//! Two independent budgets apply to every page request:
//!
//! - HTTP 429 responses are waited out using the server's
//!   `x-ratelimit-reset` hint and retried without limit. They never consume
//!   the retry budget below.
//! - Transient failures (network errors, 5xx) are retried up to
//!   [`RetryPolicy::max_retries`] times with linear backoff.
//!
//! Everything else is returned immediately.

use std::future::Future;
use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::error::FetchError;

/// Response header carrying the seconds until the rate-limit window resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Reset hint assumed when a 429 response carries no usable header.
pub const DEFAULT_RESET_SECS: u64 = 2;

/// Retry budget for transient, non-429 failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure. `0` disables retries.
    pub max_retries: u32,
    /// Delay before the n-th retry is `backoff_base_ms * n`.
    pub backoff_base_ms: u64,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, backoff_base_ms: u64) -> Self {
        Self {
            max_retries,
            backoff_base_ms,
        }
    }

    /// Linear backoff: `backoff_base_ms * attempt`.
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_base_ms.saturating_mul(u64::from(attempt)))
    }
}

/// Reads the reset hint from a 429 response, falling back to
/// [`DEFAULT_RESET_SECS`] when the header is absent or unparseable.
#[must_use]
pub fn reset_secs_from_headers(headers: &HeaderMap) -> u64 {
    headers
        .get(RATE_LIMIT_RESET_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RESET_SECS)
}

/// Time to wait after a 429: one second past the advertised reset.
#[must_use]
pub fn rate_limit_wait(reset_secs: u64) -> Duration {
    Duration::from_secs(reset_secs.saturating_add(1))
}

/// Returns `true` if `err` is a transient condition worth retrying.
///
/// - [`FetchError::Http`]: connection reset, timeout, TLS hiccup.
/// - [`FetchError::UnexpectedStatus`] with a 5xx status.
///
/// Client errors, parse failures and configuration problems are never retried:
/// repeating the request would produce the same answer.
fn is_retriable(err: &FetchError) -> bool {
    match err {
        FetchError::Http(_) => true,
        FetchError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Executes `operation`, waiting out rate limits and retrying transient errors.
///
/// | Outcome                 | Action                                       | Budget |
/// |-------------------------|----------------------------------------------|--------|
/// | `Ok`                    | return                                       | —      |
/// | `RateLimited`           | sleep `reset + 1` s, repeat                  | none   |
/// | `Http` / 5xx            | sleep `base * n` ms, repeat while `n <= max` | yes    |
/// | anything else           | return the error                             | —      |
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(FetchError::RateLimited { url, reset_secs }) => {
                let wait = rate_limit_wait(reset_secs);
                tracing::warn!(
                    url = %url,
                    reset_secs,
                    wait_secs = wait.as_secs(),
                    "rate limited — waiting for the window to reset"
                );
                tokio::time::sleep(wait).await;
            }
            Err(err) => {
                if !is_retriable(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay = policy.backoff_delay(attempt);
                tracing::warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transient catalog error — retrying after backoff"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
