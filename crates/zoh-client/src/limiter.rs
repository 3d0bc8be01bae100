//! Client-side token bucket shared by every request a client issues.
//!
//! Tokens refill continuously at the configured rate up to the burst capacity.
//! The bucket itself is a `governor` GCRA limiter, which performs the token
//! accounting atomically. Waiters queue on a fair `tokio` mutex before they are
//! allowed to wait on the bucket, so tokens go out in arrival order and no caller
//! is overtaken by one that arrived later.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use zoh_core::{Result, ZohError};

use crate::config::RateLimitConfig;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Token bucket limiter for outbound requests
pub struct TokenBucketLimiter {
    bucket: DirectLimiter,
    queue: Mutex<()>,
    capacity: NonZeroU32,
    refill_period: Duration,
}

impl TokenBucketLimiter {
    /// Create a limiter from a requests-per-minute budget
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_period(config.refill_period(), config.burst)
    }

    /// Create a limiter that refills one token every `refill_period`
    #[must_use]
    pub fn with_period(refill_period: Duration, capacity: NonZeroU32) -> Self {
        let refill_period = refill_period.max(Duration::from_nanos(1));
        let quota = Quota::with_period(refill_period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(capacity);

        Self {
            bucket: RateLimiter::direct(quota),
            queue: Mutex::new(()),
            capacity,
            refill_period,
        }
    }

    /// Maximum burst
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity.get()
    }

    /// Time to refill a single token
    #[must_use]
    pub const fn refill_period(&self) -> Duration {
        self.refill_period
    }

    /// Wait for a token and consume it.
    ///
    /// Returns [`ZohError::Cancelled`] if `cancel` fires first. A caller that
    /// gives up while queued consumes nothing.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<()> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("token wait cancelled");
                Err(ZohError::Cancelled)
            }
            () = self.wait_turn() => Ok(()),
        }
    }

    /// Take a token if one is available right now and nobody is queued ahead.
    pub fn try_acquire(&self) -> bool {
        match self.queue.try_lock() {
            Ok(_turn) => self.bucket.check().is_ok(),
            Err(_) => false,
        }
    }

    async fn wait_turn(&self) {
        let _turn = self.queue.lock().await;
        self.bucket.until_ready().await;
    }
}

impl std::fmt::Debug for TokenBucketLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBucketLimiter")
            .field("capacity", &self.capacity)
            .field("refill_period", &self.refill_period)
            .finish_non_exhaustive()
    }
}
