use thiserror::Error;

/// Result type alias for zoh operations
pub type Result<T> = std::result::Result<T, ZohError>;

/// Errors that can occur when talking to the Zoho APIs
#[derive(Error, Debug)]
pub enum ZohError {
    /// Authentication failed - invalid, expired or missing access token
    #[error("authentication failed: invalid or expired access token")]
    Unauthorized,

    /// Rate limit still exceeded after the client exhausted its retries
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds the server asked us to wait, when it said so
        retry_after: Option<u64>,
    },

    /// Resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// API returned a non-success HTTP status
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message decoded from the response body
        message: String,
    },

    /// HTTP 200 whose envelope reports a failure
    #[error("API error: {description} (code {code})")]
    Envelope {
        /// Status code carried inside the envelope
        code: u16,
        /// Description carried inside the envelope
        description: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out below the HTTP layer
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// The caller cancelled the operation while it was waiting
    #[error("operation cancelled")]
    Cancelled,

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The token source could not produce a credential
    #[error("could not obtain access token: {0}")]
    Token(String),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ZohError {
    /// Returns true if the error is worth retrying at a higher level
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Token(_))
    }

    /// Returns true if the caller cancelled the operation
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ZohError::Unauthorized.status_code(), Some(401));
        assert_eq!(
            ZohError::RateLimited { retry_after: Some(2) }.status_code(),
            Some(429)
        );
        assert_eq!(
            ZohError::Api {
                code: 503,
                message: "unavailable".into()
            }
            .status_code(),
            Some(503)
        );
        assert_eq!(ZohError::Cancelled.status_code(), None);
    }

    #[test]
    fn test_classification() {
        assert!(ZohError::RateLimited { retry_after: None }.is_retryable());
        assert!(ZohError::Connection("reset".into()).is_retryable());
        assert!(!ZohError::Cancelled.is_retryable());
        assert!(ZohError::Cancelled.is_cancelled());
        assert!(ZohError::Token("expired".into()).is_auth_error());
    }

    #[test]
    fn test_envelope_display() {
        let err = ZohError::Envelope {
            code: 500,
            description: "Internal Error".into(),
        };
        assert_eq!(err.to_string(), "API error: Internal Error (code 500)");
    }
}
