//! Credential sources.
//!
//! The client never obtains or refreshes tokens itself. It asks a
//! [`TokenSource`] for the current bearer token before each logical request.

use async_trait::async_trait;
use zoh_core::{Result, ZohError};

/// Supplies a currently valid access token on demand
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return the token to put in the `Authorization` header
    async fn token(&self) -> Result<String>;
}

/// A fixed access token, e.g. from the command line or environment
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    /// Wrap an access token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<String> {
        if self.token.trim().is_empty() {
            return Err(ZohError::Token("access token is empty".into()));
        }
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token() {
        let source = StaticToken::new("1000.abc");
        assert_eq!(source.token().await.unwrap(), "1000.abc");
        assert!(!format!("{source:?}").contains("1000.abc"));
    }

    #[tokio::test]
    async fn test_empty_token_rejected() {
        let err = StaticToken::new("  ").token().await.unwrap_err();
        assert!(err.is_auth_error());
    }
}
