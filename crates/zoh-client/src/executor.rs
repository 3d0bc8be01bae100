//! Request construction and dispatch.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;
use zoh_core::{Result, ZohError};

use crate::auth::TokenSource;
use crate::config::Endpoints;
use crate::transport::RetryingTransport;

/// Which base address a path is relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Organization administration API
    Api,
    /// Mail API
    Mail,
    /// Accounts server
    Accounts,
}

/// Whether to attach the bearer token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Credentials {
    /// `Authorization: Bearer <token>` from the token source
    #[default]
    Bearer,
    /// No credential; the endpoint authenticates some other way
    Skip,
}

/// One request, relative to a [`Service`] base
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    service: Service,
    path: String,
    body: Option<Vec<u8>>,
    credentials: Credentials,
}

impl ApiRequest {
    /// Create a request with the given method
    #[must_use]
    pub fn new(method: Method, service: Service, path: impl Into<String>) -> Self {
        Self {
            method,
            service,
            path: path.into(),
            body: None,
            credentials: Credentials::Bearer,
        }
    }

    /// Create a GET request
    #[must_use]
    pub fn get(service: Service, path: impl Into<String>) -> Self {
        Self::new(Method::GET, service, path)
    }

    /// Attach a raw body
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self> {
        Ok(self.body(serde_json::to_vec(body)?))
    }

    /// Send without the bearer token
    #[must_use]
    pub fn without_credentials(mut self) -> Self {
        self.credentials = Credentials::Skip;
        self
    }

    /// HTTP method
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the service base
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Only body-bearing mutations declare a content type
    fn wants_content_type(&self) -> bool {
        self.body.is_some()
            && (self.method == Method::POST
                || self.method == Method::PUT
                || self.method == Method::PATCH)
    }
}

/// Builds absolute requests and sends them through the retrying transport
#[derive(Clone)]
pub struct RequestExecutor {
    http: reqwest::Client,
    transport: RetryingTransport,
    tokens: Arc<dyn TokenSource>,
    endpoints: Endpoints,
}

impl RequestExecutor {
    /// Create an executor
    pub fn new(
        http: reqwest::Client,
        transport: RetryingTransport,
        tokens: Arc<dyn TokenSource>,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            http,
            transport,
            tokens,
            endpoints,
        }
    }

    /// Base URLs in use
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The transport requests go through
    #[must_use]
    pub const fn transport(&self) -> &RetryingTransport {
        &self.transport
    }

    /// Build and execute a request, returning the raw response.
    ///
    /// The body is not decoded and non-2xx statuses are not turned into errors.
    pub async fn execute(&self, request: ApiRequest, cancel: &CancellationToken) -> Result<Response> {
        let url = self.build_url(request.service, &request.path)?;
        debug!(method = %request.method, url = %url, "API request");

        let mut builder = self.http.request(request.method.clone(), url);

        if request.wants_content_type() {
            builder = builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        if request.credentials == Credentials::Bearer {
            let token = self.tokens.token().await?;
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let request = builder
            .build()
            .map_err(|e| ZohError::Http(e.to_string()))?;

        self.transport.execute(request, cancel).await
    }

    fn build_url(&self, service: Service, path: &str) -> Result<Url> {
        let base = match service {
            Service::Api => &self.endpoints.api_base,
            Service::Mail => &self.endpoints.mail_base,
            Service::Accounts => &self.endpoints.accounts_base,
        };
        let joined = format!("{}{}", base.trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| ZohError::InvalidUrl(format!("{joined}: {e}")))
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("endpoints", &self.endpoints)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_only_for_mutations_with_body() {
        let put = ApiRequest::new(Method::PUT, Service::Mail, "/x").body("{}");
        assert!(put.wants_content_type());

        let patch = ApiRequest::new(Method::PATCH, Service::Mail, "/x").body("{}");
        assert!(patch.wants_content_type());

        let empty_post = ApiRequest::new(Method::POST, Service::Mail, "/x");
        assert!(!empty_post.wants_content_type());

        let get_with_body = ApiRequest::get(Service::Mail, "/x").body("{}");
        assert!(!get_with_body.wants_content_type());
    }

    #[test]
    fn test_json_body() {
        let req = ApiRequest::new(Method::POST, Service::Api, "/x")
            .json(&serde_json::json!({"a": 1}))
            .unwrap();
        assert_eq!(req.body.as_deref(), Some(&br#"{"a":1}"#[..]));
        assert_eq!(req.credentials, Credentials::Bearer);
        assert_eq!(req.without_credentials().credentials, Credentials::Skip);
    }
}
