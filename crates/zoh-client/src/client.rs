//! Main Zoho API client implementation.

use crate::api::*;
use crate::auth::{StaticToken, TokenSource};
use crate::config::{Endpoints, RateLimitConfig, Region, RetryConfig};
use crate::executor::{ApiRequest, RequestExecutor};
use crate::limiter::TokenBucketLimiter;
use crate::transport::{parse_retry_after, RetryingTransport, SendRequest};
use reqwest::header::RETRY_AFTER;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use zoh_core::{ApiErrorBody, Envelope, Result, StatusOnly, ZohError};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Main Zoho API client
///
/// Cloning is cheap; clones share the rate limiter and the cached
/// organization and account ids.
#[derive(Clone)]
pub struct ZohoClient {
    inner: Arc<ClientInner>,
    cancel: CancellationToken,
}

struct ClientInner {
    executor: RequestExecutor,
    zoid: OnceCell<i64>,
    account_id: OnceCell<String>,
}

impl ZohoClient {
    /// Create a new client for the given access token using default settings
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        ZohoClientBuilder::new(StaticToken::new(access_token)).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(tokens: impl TokenSource + 'static) -> ZohoClientBuilder {
        ZohoClientBuilder::new(tokens)
    }

    /// A handle whose requests are abandoned when `cancel` fires.
    ///
    /// The returned client shares limiter and caches with `self`.
    #[must_use]
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel,
        }
    }

    /// Cancellation token in effect for this handle
    #[must_use]
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Low-level executor returning raw responses
    #[must_use]
    pub fn executor(&self) -> &RequestExecutor {
        &self.inner.executor
    }

    /// Access organization administration endpoints
    #[must_use]
    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }

    /// Access mailbox endpoints
    #[must_use]
    pub fn mail(&self) -> MailApi<'_> {
        MailApi::new(self)
    }

    /// Access organization-wide mail settings
    #[must_use]
    pub fn mail_admin(&self) -> MailAdminApi<'_> {
        MailAdminApi::new(self)
    }

    /// Access accounts-server endpoints
    #[must_use]
    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi::new(self)
    }

    pub(crate) fn zoid_cell(&self) -> &OnceCell<i64> {
        &self.inner.zoid
    }

    pub(crate) fn account_id_cell(&self) -> &OnceCell<String> {
        &self.inner.account_id
    }

    /// Execute a request and decode the whole JSON body
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let resource = request.path().to_string();
        let response = self.inner.executor.execute(request, &self.cancel).await?;
        self.handle_response(&resource, response).await
    }

    /// Execute a request and unwrap the `data` field of its envelope
    pub(crate) async fn fetch_data<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.fetch::<Envelope<T>>(request).await?.into_data()
    }

    /// Execute a request whose envelope carries only a status
    pub(crate) async fn fetch_status(&self, request: ApiRequest) -> Result<()> {
        self.fetch::<StatusOnly>(request).await?.into_result()
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resource: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| ZohError::Http(e.to_string()))?;
            serde_json::from_str(&body).map_err(ZohError::Json)
        } else {
            Err(self.handle_error(resource, response).await)
        }
    }

    /// Convert an error response to a ZohError
    async fn handle_error(&self, resource: &str, response: reqwest::Response) -> ZohError {
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after)
            .map(|d| d.as_secs());
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| e.message())
            .unwrap_or(body);
        debug!(status, resource, message = %message, "API error response");

        match status {
            401 => ZohError::Unauthorized,
            404 => ZohError::NotFound {
                resource: format!("{resource}: {message}"),
            },
            429 => {
                warn!("rate limited by Zoho API after retries");
                ZohError::RateLimited { retry_after }
            }
            _ => ZohError::Api {
                code: status,
                message,
            },
        }
    }
}

impl std::fmt::Debug for ZohoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZohoClient")
            .field("executor", &self.inner.executor)
            .field("zoid", &self.inner.zoid.get())
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a [`ZohoClient`]
pub struct ZohoClientBuilder {
    tokens: Arc<dyn TokenSource>,
    region: Region,
    endpoints: Option<Endpoints>,
    timeout: Duration,
    user_agent: String,
    retry_config: RetryConfig,
    rate_limit: RateLimitConfig,
    sender: Option<Arc<dyn SendRequest>>,
    cancel: CancellationToken,
}

impl ZohoClientBuilder {
    /// Create a new builder with the given token source
    #[must_use]
    pub fn new(tokens: impl TokenSource + 'static) -> Self {
        Self {
            tokens: Arc::new(tokens),
            region: Region::default(),
            endpoints: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("zoh/{}", env!("CARGO_PKG_VERSION")),
            retry_config: RetryConfig::default(),
            rate_limit: RateLimitConfig::default(),
            sender: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Select the data center
    #[must_use]
    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Override every base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints = Some(Endpoints::uniform(url));
        self
    }

    /// Override base URLs individually
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set retry configuration
    #[must_use]
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Set the client-side rate limit
    #[must_use]
    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    /// Send requests through a custom primitive instead of the built-in HTTP client
    #[must_use]
    pub fn sender(mut self, sender: Arc<dyn SendRequest>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Cancellation token for the built client
    #[must_use]
    pub fn cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ZohoClient> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| ZohError::Config(format!("failed to build HTTP client: {e}")))?;

        let sender = self
            .sender
            .unwrap_or_else(|| Arc::new(http.clone()) as Arc<dyn SendRequest>);
        let limiter = Arc::new(TokenBucketLimiter::new(self.rate_limit));
        let transport = RetryingTransport::new(sender, limiter, self.retry_config);
        let endpoints = self.endpoints.unwrap_or_else(|| self.region.endpoints());

        Ok(ZohoClient {
            inner: Arc::new(ClientInner {
                executor: RequestExecutor::new(http, transport, self.tokens, endpoints),
                zoid: OnceCell::new(),
                account_id: OnceCell::new(),
            }),
            cancel: self.cancel,
        })
    }
}

// URL encoding helper
pub(crate) mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_region_endpoints() {
        let client = ZohoClient::builder(StaticToken::new("t"))
            .region(Region::Eu)
            .build()
            .unwrap();
        assert_eq!(client.executor().endpoints().mail_base, "https://mail.zoho.eu");
    }

    #[test]
    fn test_clones_share_limiter() {
        let client = ZohoClient::new("t").unwrap();
        let other = client.with_cancellation(CancellationToken::new());
        assert!(Arc::ptr_eq(
            client.executor().transport().limiter(),
            other.executor().transport().limiter()
        ));
    }

    #[test]
    fn test_urlencoding() {
        assert_eq!(urlencoding::encode("a b&c"), "a+b%26c");
    }
}
