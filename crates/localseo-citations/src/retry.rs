//! Retry loop for listing page fetches.
//!
//! One fixed base delay, doubled on every retry. Only transient failures
//! (429 and network errors) are retried; everything else is returned as-is.

use std::future::Future;
use std::time::Duration;

use crate::error::CitationError;

/// Returns `true` if `err` is worth another attempt after a delay.
///
/// Retriable:
/// - [`CitationError::RateLimited`]: the directory asked us to back off.
/// - [`CitationError::Http`]: connection reset, timeout, TLS hiccup.
///
/// Not retriable: [`CitationError::NotFound`], [`CitationError::UnexpectedStatus`]
/// and [`CitationError::InvalidUrl`] would fail the same way again.
fn is_retriable(err: &CitationError) -> bool {
    matches!(
        err,
        CitationError::RateLimited { .. } | CitationError::Http(_)
    )
}

/// Executes `operation`, retrying transient errors up to `max_retries`
/// additional times.
///
/// The sleep before retry `n` (1-based) is `base_delay_ms * 2^(n-1)`:
///
/// | Attempt | Sleep before it |
/// |---------|-----------------|
/// | 0 (initial) | none |
/// | 1 | base |
/// | 2 | base x 2 |
/// | 3 | base x 4 |
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    base_delay_ms: u64,
    mut operation: F,
) -> Result<T, CitationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CitationError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_ms = base_delay_ms.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms,
            error = %err,
            "transient listing fetch error, retrying"
        );
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        attempt += 1;
    }
}
