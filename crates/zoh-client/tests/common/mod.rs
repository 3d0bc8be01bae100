#![allow(dead_code)]

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use zoh_client::limiter::TokenBucketLimiter;
use zoh_client::transport::{RetryingTransport, SendRequest};
use zoh_client::{RateLimitConfig, RetryConfig, StaticToken, ZohoClient};

pub const TOKEN: &str = "1000.test-token";

pub fn nonzero(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

/// Limits loose enough to never throttle a test
pub fn unthrottled() -> RateLimitConfig {
    RateLimitConfig::new(nonzero(60_000), nonzero(100))
}

/// Short backoff so retry tests finish quickly
pub fn quick_retry() -> RetryConfig {
    RetryConfig::new()
        .initial_interval(Duration::from_millis(10))
        .max_interval(Duration::from_millis(50))
        .max_elapsed_time(Duration::from_secs(10))
}

pub fn client(base: &str) -> ZohoClient {
    ZohoClient::builder(StaticToken::new(TOKEN))
        .base_url(base)
        .rate_limit(unthrottled())
        .retry(quick_retry())
        .build()
        .unwrap()
}

pub fn transport(limits: RateLimitConfig, retry: RetryConfig) -> RetryingTransport {
    let http: Arc<dyn SendRequest> = Arc::new(reqwest::Client::new());
    RetryingTransport::new(http, Arc::new(TokenBucketLimiter::new(limits)), retry)
}

pub fn get(url: &str) -> reqwest::Request {
    reqwest::Client::new().get(url).build().unwrap()
}

/// `{"status":{"code":200,...},"data":<data>}`
pub fn envelope(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "status": {"code": 200, "description": "success"},
        "data": data,
    })
}
