//! Rate-limit aware transport.
//!
//! Every attempt first takes a token from the shared [`TokenBucketLimiter`].
//! A `429 Too Many Requests` answer is retried, waiting either for the delay the
//! server asked for in `Retry-After` or for an exponential backoff interval.
//! Any other response, and any failure below the HTTP layer, goes straight back
//! to the caller. When the retry budget runs out the last 429 response itself is
//! returned so callers can decode it like any other error response.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Request, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use zoh_core::{Result, ZohError};

use crate::config::RetryConfig;
use crate::limiter::TokenBucketLimiter;

/// Anything that can put a fully formed request on the wire
#[async_trait]
pub trait SendRequest: Send + Sync {
    /// Send one request; no retries
    async fn send(&self, request: Request) -> reqwest::Result<Response>;
}

#[async_trait]
impl SendRequest for reqwest::Client {
    async fn send(&self, request: Request) -> reqwest::Result<Response> {
        self.execute(request).await
    }
}

/// Book-keeping for one logical request
#[derive(Debug)]
pub struct RetryState {
    attempts: u32,
    backoffs: u32,
    started: Instant,
}

impl RetryState {
    /// Start tracking a new logical request
    #[must_use]
    pub fn new() -> Self {
        Self {
            attempts: 0,
            backoffs: 0,
            started: Instant::now(),
        }
    }

    /// Sends performed so far
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Time since the first attempt
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Next exponential backoff interval, or `None` once waiting it out would
    /// overrun the elapsed-time budget.
    pub fn next_backoff(&mut self, policy: &RetryConfig) -> Option<Duration> {
        let next = policy.backoff_for(self.backoffs);
        if self.elapsed() + next > policy.max_elapsed_time {
            return None;
        }
        self.backoffs += 1;
        Some(next)
    }
}

impl Default for RetryState {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `Retry-After` value, either delay-seconds or an HTTP-date.
///
/// Returns `None` for anything unparseable and for delays that are not
/// strictly positive; callers fall back to backoff in both cases.
#[must_use]
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let value = value.trim();

    if let Ok(seconds) = value.parse::<i64>() {
        return u64::try_from(seconds)
            .ok()
            .filter(|s| *s > 0)
            .map(Duration::from_secs);
    }

    let date = DateTime::parse_from_rfc2822(value).ok()?;
    (date.with_timezone(&Utc) - Utc::now())
        .to_std()
        .ok()
        .filter(|d| !d.is_zero())
}

fn server_directed_delay(headers: &HeaderMap) -> Option<Duration> {
    let raw = headers.get(RETRY_AFTER)?;
    let delay = raw.to_str().ok().and_then(parse_retry_after);
    if delay.is_none() {
        warn!(value = ?raw, "ignoring unusable Retry-After header, using backoff");
    }
    delay
}

/// Wraps a [`SendRequest`] with client-side throttling and 429 recovery
#[derive(Clone)]
pub struct RetryingTransport {
    inner: Arc<dyn SendRequest>,
    limiter: Arc<TokenBucketLimiter>,
    policy: RetryConfig,
}

impl RetryingTransport {
    /// Create a transport around `inner` sharing `limiter`
    pub fn new(
        inner: Arc<dyn SendRequest>,
        limiter: Arc<TokenBucketLimiter>,
        policy: RetryConfig,
    ) -> Self {
        Self {
            inner,
            limiter,
            policy,
        }
    }

    /// The shared limiter
    #[must_use]
    pub fn limiter(&self) -> &Arc<TokenBucketLimiter> {
        &self.limiter
    }

    /// The retry policy
    #[must_use]
    pub const fn policy(&self) -> &RetryConfig {
        &self.policy
    }

    /// Execute a request, retrying rate-limit rejections.
    ///
    /// A 429 returned after the budget is spent is `Ok`, not an error.
    ///
    /// A request whose body cannot be cloned (a streaming body) is sent exactly
    /// once: it takes one token and a 429 answer comes straight back without
    /// any retry. Requests built by [`RequestExecutor`](crate::executor::RequestExecutor)
    /// always carry a buffered body and never take this path.
    pub async fn execute(&self, request: Request, cancel: &CancellationToken) -> Result<Response> {
        let mut state = RetryState::new();
        let budget = self.policy.attempt_budget();

        loop {
            self.limiter.acquire(cancel).await?;

            let Some(attempt) = request.try_clone() else {
                debug!(url = %request.url(), "request body cannot be replayed, sending once");
                return self.send(request, cancel).await;
            };

            let response = self.send(attempt, cancel).await?;
            state.record_attempt();

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }

            if state.attempts() >= budget {
                warn!(
                    url = %request.url(),
                    attempts = state.attempts(),
                    "still rate limited, retry budget exhausted"
                );
                return Ok(response);
            }

            let wait = match server_directed_delay(response.headers()) {
                Some(delay) => delay,
                None => match state.next_backoff(&self.policy) {
                    Some(delay) => delay,
                    None => {
                        warn!(
                            url = %request.url(),
                            elapsed = ?state.elapsed(),
                            "still rate limited, backoff time budget exhausted"
                        );
                        return Ok(response);
                    }
                },
            };

            debug!(
                url = %request.url(),
                attempt = state.attempts(),
                wait = ?wait,
                "rate limited, waiting before retry"
            );

            // Release the connection before sleeping. A stalled body must not
            // outlive cancellation.
            let drain_then_wait = async {
                let _ = response.bytes().await;
                tokio::time::sleep(wait).await;
            };

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(ZohError::Cancelled),
                () = drain_then_wait => {}
            }
        }
    }

    async fn send(&self, request: Request, cancel: &CancellationToken) -> Result<Response> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ZohError::Cancelled),
            sent = self.inner.send(request) => sent.map_err(classify),
        }
    }
}

impl std::fmt::Debug for RetryingTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryingTransport")
            .field("limiter", &self.limiter)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn classify(err: reqwest::Error) -> ZohError {
    if err.is_timeout() {
        ZohError::Timeout(err.to_string())
    } else if err.is_connect() {
        ZohError::Connection(err.to_string())
    } else {
        ZohError::Http(err.to_string())
    }
}
