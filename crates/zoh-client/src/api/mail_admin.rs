//! Organization-wide mail settings.

use super::admin::organization_id;
use crate::client::urlencoding;
use crate::executor::{ApiRequest, Service};
use crate::pagination::{PageIterator, PageSource, DEFAULT_PAGE_SIZE};
use crate::ZohoClient;
use reqwest::Method;
use serde_json::Value;
use tracing::info;
use zoh_core::{DeliveryLog, Result, SpamCategory, SpamUpdateRequest};

/// Organization-wide mail settings
#[derive(Clone, Copy)]
pub struct MailAdminApi<'a> {
    client: &'a ZohoClient,
}

impl<'a> MailAdminApi<'a> {
    pub(crate) fn new(client: &'a ZohoClient) -> Self {
        Self { client }
    }

    /// Entries of one allow/block list
    pub async fn spam_settings(&self, category: SpamCategory) -> Result<Vec<String>> {
        let zoid = organization_id(self.client).await?;
        self.client
            .fetch_data(ApiRequest::get(
                Service::Mail,
                format!(
                    "/api/organization/{zoid}/antispam/data?spamCategory={}",
                    urlencoding::encode(category.as_str())
                ),
            ))
            .await
    }

    /// Replace the entries of one allow/block list
    pub async fn update_spam_list(&self, category: SpamCategory, values: Vec<String>) -> Result<()> {
        let zoid = organization_id(self.client).await?;
        let count = values.len();
        let request = ApiRequest::new(
            Method::PUT,
            Service::Mail,
            format!("/api/organization/{zoid}/antispam/data"),
        )
        .json(&SpamUpdateRequest {
            spam_category: category,
            value: values,
        })?;

        self.client.fetch_status(request).await?;
        info!(%category, count, "updated spam list");
        Ok(())
    }

    /// Retention policy, as returned by the server.
    ///
    /// The policy layout is undocumented, so the whole body is handed back.
    pub async fn retention_policy(&self) -> Result<Value> {
        let zoid = organization_id(self.client).await?;
        self.client
            .fetch(ApiRequest::get(
                Service::Mail,
                format!("/api/organization/{zoid}/mailpolicy/retention"),
            ))
            .await
    }

    /// One page of delivery logs
    pub async fn delivery_logs(&self, start: usize, limit: usize) -> Result<Vec<DeliveryLog>> {
        delivery_log_page(self.client, start, limit).await
    }

    /// Page through delivery logs `page_size` entries at a time
    #[must_use]
    pub fn delivery_log_pages(
        &self,
        page_size: usize,
    ) -> PageIterator<DeliveryLog, impl PageSource<DeliveryLog> + 'a> {
        let client = self.client;
        PageIterator::new(
            move |start: usize, limit: usize| delivery_log_page(client, start, limit),
            page_size,
        )
    }

    /// Every delivery log entry
    pub async fn all_delivery_logs(&self) -> Result<Vec<DeliveryLog>> {
        self.delivery_log_pages(DEFAULT_PAGE_SIZE).fetch_all().await
    }
}

async fn delivery_log_page(
    client: &ZohoClient,
    start: usize,
    limit: usize,
) -> Result<Vec<DeliveryLog>> {
    let zoid = organization_id(client).await?;
    client
        .fetch_data(ApiRequest::get(
            Service::Mail,
            format!("/api/organization/{zoid}/deliverylog?start={start}&limit={limit}"),
        ))
        .await
}
