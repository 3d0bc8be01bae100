//! Mailbox endpoints.
//!
//! Every call here is scoped to a mail account. Unless told otherwise the
//! token owner's first account is used, resolved once per client.

use crate::executor::{ApiRequest, Service};
use crate::pagination::{PageIterator, PageSource, DEFAULT_PAGE_SIZE};
use crate::ZohoClient;
use tracing::debug;
use zoh_core::{
    Folder, Label, MailAccount, MessageContent, MessageMetadata, MessageSummary, Result, ZohError,
};

/// Mailbox endpoints
#[derive(Clone, Copy)]
pub struct MailApi<'a> {
    client: &'a ZohoClient,
}

impl<'a> MailApi<'a> {
    pub(crate) fn new(client: &'a ZohoClient) -> Self {
        Self { client }
    }

    /// Mail accounts owned by the token's user
    pub async fn list_accounts(&self) -> Result<Vec<MailAccount>> {
        self.client
            .fetch_data(ApiRequest::get(Service::Mail, "/api/accounts"))
            .await
    }

    /// Id of the first mail account, looked up once per client
    pub async fn primary_account_id(&self) -> Result<String> {
        primary_account_id(self.client).await
    }

    /// Folders of the primary account
    pub async fn list_folders(&self) -> Result<Vec<Folder>> {
        let account_id = self.primary_account_id().await?;
        self.client
            .fetch_data(ApiRequest::get(
                Service::Mail,
                format!("/api/accounts/{account_id}/folders"),
            ))
            .await
    }

    /// Find a folder by name, ignoring case
    pub async fn get_folder_by_name(&self, name: &str) -> Result<Folder> {
        self.list_folders()
            .await?
            .into_iter()
            .find(|f| f.folder_name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ZohError::NotFound {
                resource: format!("folder {name}"),
            })
    }

    /// Labels of the primary account
    pub async fn list_labels(&self) -> Result<Vec<Label>> {
        let account_id = self.primary_account_id().await?;
        self.client
            .fetch_data(ApiRequest::get(
                Service::Mail,
                format!("/api/accounts/{account_id}/labels"),
            ))
            .await
    }

    /// One page of messages in a folder
    pub async fn list_messages(
        &self,
        folder_id: &str,
        start: usize,
        limit: usize,
    ) -> Result<Vec<MessageSummary>> {
        list_messages_page(self.client, folder_id, start, limit).await
    }

    /// Page through a folder `page_size` messages at a time
    #[must_use]
    pub fn messages(
        &self,
        folder_id: &'a str,
        page_size: usize,
    ) -> PageIterator<MessageSummary, impl PageSource<MessageSummary> + 'a> {
        let client = self.client;
        PageIterator::new(
            move |start: usize, limit: usize| list_messages_page(client, folder_id, start, limit),
            page_size,
        )
    }

    /// Every message in a folder
    pub async fn all_messages(&self, folder_id: &str) -> Result<Vec<MessageSummary>> {
        let client = self.client;
        PageIterator::new(
            move |start: usize, limit: usize| list_messages_page(client, folder_id, start, limit),
            DEFAULT_PAGE_SIZE,
        )
        .fetch_all()
        .await
    }

    /// Headers and flags of one message
    pub async fn message_metadata(
        &self,
        folder_id: &str,
        message_id: &str,
    ) -> Result<MessageMetadata> {
        let account_id = self.primary_account_id().await?;
        self.client
            .fetch_data(ApiRequest::get(
                Service::Mail,
                format!("/api/accounts/{account_id}/folders/{folder_id}/messages/{message_id}/details"),
            ))
            .await
    }

    /// Body of one message
    pub async fn message_content(
        &self,
        folder_id: &str,
        message_id: &str,
    ) -> Result<MessageContent> {
        let account_id = self.primary_account_id().await?;
        self.client
            .fetch_data(ApiRequest::get(
                Service::Mail,
                format!("/api/accounts/{account_id}/folders/{folder_id}/messages/{message_id}/content"),
            ))
            .await
    }
}

async fn primary_account_id(client: &ZohoClient) -> Result<String> {
    client
        .account_id_cell()
        .get_or_try_init(|| async {
            let accounts: Vec<MailAccount> = client
                .fetch_data(ApiRequest::get(Service::Mail, "/api/accounts"))
                .await?;
            let first = accounts.into_iter().next().ok_or_else(|| ZohError::NotFound {
                resource: "mail account".to_string(),
            })?;
            debug!(account_id = %first.account_id, "resolved primary mail account");
            Ok(first.account_id)
        })
        .await
        .cloned()
}

async fn list_messages_page(
    client: &ZohoClient,
    folder_id: &str,
    start: usize,
    limit: usize,
) -> Result<Vec<MessageSummary>> {
    let account_id = primary_account_id(client).await?;
    client
        .fetch_data(ApiRequest::get(
            Service::Mail,
            format!(
                "/api/accounts/{account_id}/messages/view?folderId={folder_id}&start={start}&limit={limit}"
            ),
        ))
        .await
}
