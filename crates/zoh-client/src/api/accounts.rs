//! Accounts server endpoints.

use crate::client::urlencoding;
use crate::executor::{ApiRequest, Service};
use crate::ZohoClient;
use zoh_core::{Result, TokenInfo};

/// Accounts server endpoints
pub struct AccountsApi<'a> {
    client: &'a ZohoClient,
}

impl<'a> AccountsApi<'a> {
    pub(crate) fn new(client: &'a ZohoClient) -> Self {
        Self { client }
    }

    /// Introspect an access token.
    ///
    /// The token travels as a query parameter; no `Authorization` header is sent.
    pub async fn token_info(&self, access_token: &str) -> Result<TokenInfo> {
        let path = format!(
            "/oauth/v2/token/info?token={}",
            urlencoding::encode(access_token)
        );
        self.client
            .fetch(ApiRequest::get(Service::Accounts, path).without_credentials())
            .await
    }
}
