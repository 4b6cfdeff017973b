// src/http.rs
// Shared HTTP client and the single-retry policy for transient transport failures

use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Default request timeout for weather and message calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upstream LLM calls from the proxy get more headroom
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the shared HTTP client.
///
/// Built once at startup and handed to every client that needs network
/// access; reqwest pools connections internally.
pub fn create_shared_client() -> reqwest::Client {
    create_client(DEFAULT_TIMEOUT)
}

pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(4)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Retry budget for idempotent-enough sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Sleep before the first retry; doubles after each one
    pub base_backoff: Duration,
}

impl RetryPolicy {
    /// One retry after 500ms
    pub const fn single() -> Self {
        Self {
            max_retries: 1,
            base_backoff: Duration::from_millis(500),
        }
    }

    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_backoff: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single()
    }
}

/// Send a request, retrying only connect and timeout failures.
///
/// HTTP error statuses come back as `Ok(response)`: the request reached the
/// server and may have been processed, so it is never replayed.
pub async fn send_with_retry<F, Fut>(
    request_id: &str,
    policy: RetryPolicy,
    mut send: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempts = 0;
    let mut backoff = policy.base_backoff;

    loop {
        match send().await {
            Ok(response) => return Ok(response),
            Err(e) if attempts < policy.max_retries && (e.is_connect() || e.is_timeout()) => {
                warn!(
                    request_id = %request_id,
                    error = %e,
                    "Request failed (connect/timeout), retrying in {:?}...",
                    backoff
                );
                tokio::time::sleep(backoff).await;
                attempts += 1;
                backoff *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}
