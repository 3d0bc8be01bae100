//! Client configuration types.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;
use zoh_core::ZohError;

/// Retry configuration for rate-limited (429) responses
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of sends per logical request, the first one included
    pub max_attempts: u32,

    /// First backoff interval
    pub initial_interval: Duration,

    /// Upper bound for a single backoff interval
    pub max_interval: Duration,

    /// Stop backing off once this much time has passed since the first attempt
    pub max_elapsed_time: Duration,

    /// Growth factor applied to the interval after each backoff
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: 3,
            initial_interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(30),
            max_elapsed_time: Duration::from_secs(120),
            multiplier: 2.0,
        }
    }

    /// Set maximum attempts
    #[must_use]
    pub const fn max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set initial backoff interval
    #[must_use]
    pub const fn initial_interval(mut self, duration: Duration) -> Self {
        self.initial_interval = duration;
        self
    }

    /// Set maximum backoff interval
    #[must_use]
    pub const fn max_interval(mut self, duration: Duration) -> Self {
        self.max_interval = duration;
        self
    }

    /// Set the elapsed-time budget for backoff
    #[must_use]
    pub const fn max_elapsed_time(mut self, duration: Duration) -> Self {
        self.max_elapsed_time = duration;
        self
    }

    /// Set the backoff multiplier (values below 1.0 are treated as 1.0)
    #[must_use]
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Effective attempt budget, never below one send
    #[must_use]
    pub fn attempt_budget(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Calculate backoff for the n-th backoff (0-based)
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = self
            .multiplier
            .max(1.0)
            .powi(i32::try_from(attempt).unwrap_or(i32::MAX));
        let backoff = self.initial_interval.as_secs_f64() * factor;
        let max = self.max_interval.as_secs_f64();
        Duration::from_secs_f64(backoff.min(max))
    }
}

/// Client-side request budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained requests per minute
    pub requests_per_minute: NonZeroU32,

    /// Requests that may be issued back-to-back from a full bucket
    pub burst: NonZeroU32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::zoho()
    }
}

impl RateLimitConfig {
    /// Zoho allows 30 requests per minute; stay at 25 with a burst of 5
    #[must_use]
    pub fn zoho() -> Self {
        Self {
            requests_per_minute: NonZeroU32::new(25).unwrap_or(NonZeroU32::MIN),
            burst: NonZeroU32::new(5).unwrap_or(NonZeroU32::MIN),
        }
    }

    /// Create a custom budget
    #[must_use]
    pub const fn new(requests_per_minute: NonZeroU32, burst: NonZeroU32) -> Self {
        Self {
            requests_per_minute,
            burst,
        }
    }

    /// Time it takes to refill one token
    #[must_use]
    pub fn refill_period(&self) -> Duration {
        Duration::from_secs(60) / self.requests_per_minute.get()
    }
}

/// Zoho data center
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// United States (zoho.com)
    #[default]
    Us,
    /// Europe (zoho.eu)
    Eu,
    /// India (zoho.in)
    In,
    /// Australia (zoho.com.au)
    Au,
    /// Japan (zoho.jp)
    Jp,
    /// Canada (zohocloud.ca)
    Ca,
    /// China (zoho.com.cn)
    Cn,
    /// Saudi Arabia (zoho.sa)
    Sa,
}

impl Region {
    /// Every supported region
    pub const ALL: [Self; 8] = [
        Self::Us,
        Self::Eu,
        Self::In,
        Self::Au,
        Self::Jp,
        Self::Ca,
        Self::Cn,
        Self::Sa,
    ];

    /// Top-level domain of the data center
    #[must_use]
    pub const fn domain(self) -> &'static str {
        match self {
            Self::Us => "zoho.com",
            Self::Eu => "zoho.eu",
            Self::In => "zoho.in",
            Self::Au => "zoho.com.au",
            Self::Jp => "zoho.jp",
            Self::Ca => "zohocloud.ca",
            Self::Cn => "zoho.com.cn",
            Self::Sa => "zoho.sa",
        }
    }

    /// Short code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Eu => "eu",
            Self::In => "in",
            Self::Au => "au",
            Self::Jp => "jp",
            Self::Ca => "ca",
            Self::Cn => "cn",
            Self::Sa => "sa",
        }
    }

    /// Base URLs for this data center
    #[must_use]
    pub fn endpoints(self) -> Endpoints {
        Endpoints {
            api_base: format!("https://mail.{}", self.domain()),
            mail_base: format!("https://mail.{}", self.domain()),
            accounts_base: format!("https://accounts.{}", self.domain()),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = ZohError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.code() == wanted || r.domain() == wanted)
            .ok_or_else(|| {
                ZohError::Config(format!(
                    "unknown region {s:?}, expected one of: us, eu, in, au, jp, ca, cn, sa"
                ))
            })
    }
}

/// Base URLs of the three services a client talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Organization administration API
    pub api_base: String,

    /// Mail API
    pub mail_base: String,

    /// Accounts server (OAuth and token introspection)
    pub accounts_base: String,
}

impl Endpoints {
    /// Point every service at the same base URL (useful for testing)
    #[must_use]
    pub fn uniform(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            api_base: base.clone(),
            mail_base: base.clone(),
            accounts_base: base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retry_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_interval, Duration::from_secs(1));
        assert_eq!(config.max_interval, Duration::from_secs(30));
        assert_eq!(config.max_elapsed_time, Duration::from_secs(120));
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let config = RetryConfig::new()
            .initial_interval(Duration::from_millis(500))
            .max_interval(Duration::from_secs(3));

        assert_eq!(config.backoff_for(0), Duration::from_millis(500));
        assert_eq!(config.backoff_for(1), Duration::from_secs(1));
        assert_eq!(config.backoff_for(2), Duration::from_secs(2));
        assert_eq!(config.backoff_for(3), Duration::from_secs(3));
        assert_eq!(config.backoff_for(40), Duration::from_secs(3));
    }

    #[test]
    fn test_backoff_non_decreasing() {
        let config = RetryConfig::new().multiplier(1.5);
        let delays: Vec<_> = (0..12).map(|n| config.backoff_for(n)).collect();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
        assert!(delays.iter().all(|d| *d <= config.max_interval));
    }

    #[test]
    fn test_attempt_budget_floor() {
        assert_eq!(RetryConfig::new().max_attempts(0).attempt_budget(), 1);
    }

    #[test]
    fn test_default_rate_limit() {
        let config = RateLimitConfig::default();
        assert_eq!(config.requests_per_minute.get(), 25);
        assert_eq!(config.burst.get(), 5);
        assert_eq!(config.refill_period(), Duration::from_millis(2400));
    }

    #[test]
    fn test_region_endpoints() {
        let eu = "EU".parse::<Region>().unwrap().endpoints();
        assert_eq!(eu.mail_base, "https://mail.zoho.eu");
        assert_eq!(eu.accounts_base, "https://accounts.zoho.eu");
        assert_eq!("zoho.com.au".parse::<Region>().unwrap(), Region::Au);
        assert!("mars".parse::<Region>().is_err());
    }
}
