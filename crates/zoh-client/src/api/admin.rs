//! Organization administration endpoints.

use crate::executor::{ApiRequest, Service};
use crate::pagination::{PageIterator, PageSource, DEFAULT_PAGE_SIZE};
use crate::ZohoClient;
use tracing::debug;
use zoh_core::{Organization, Result, User, UserIdentifier, ZohError};

/// Organization administration endpoints
#[derive(Clone, Copy)]
pub struct AdminApi<'a> {
    client: &'a ZohoClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(client: &'a ZohoClient) -> Self {
        Self { client }
    }

    /// Organization the token belongs to
    pub async fn organization(&self) -> Result<Organization> {
        self.client
            .fetch_data(ApiRequest::get(Service::Api, "/api/organization/"))
            .await
    }

    /// Organization id (zoid), looked up once per client
    pub async fn organization_id(&self) -> Result<i64> {
        organization_id(self.client).await
    }

    /// One page of users
    pub async fn list_users(&self, start: usize, limit: usize) -> Result<Vec<User>> {
        list_users_page(self.client, start, limit).await
    }

    /// Page through every user `page_size` at a time
    #[must_use]
    pub fn users(&self, page_size: usize) -> PageIterator<User, impl PageSource<User> + 'a> {
        let client = self.client;
        PageIterator::new(
            move |start: usize, limit: usize| list_users_page(client, start, limit),
            page_size,
        )
    }

    /// Every user in the organization
    pub async fn all_users(&self) -> Result<Vec<User>> {
        self.users(DEFAULT_PAGE_SIZE).fetch_all().await
    }

    /// A single user by zuid
    pub async fn get_user(&self, zuid: i64) -> Result<User> {
        let zoid = self.organization_id().await?;
        self.client
            .fetch_data(ApiRequest::get(
                Service::Api,
                format!("/api/organization/{zoid}/accounts/{zuid}"),
            ))
            .await
    }

    /// Find a user by email address, stopping at the first page that has it
    pub async fn get_user_by_email(&self, email: &str) -> Result<User> {
        let mut pages = self.users(DEFAULT_PAGE_SIZE);
        while let Some(page) = pages.next_page().await? {
            if let Some(user) = page.into_iter().find(|u| u.has_email(email)) {
                return Ok(user);
            }
        }

        debug!(email, "no user with this address");
        Err(ZohError::NotFound {
            resource: format!("user {email}"),
        })
    }

    /// Resolve a zuid or an email address
    pub async fn get_user_by_identifier(&self, identifier: &str) -> Result<User> {
        match UserIdentifier::parse(identifier) {
            UserIdentifier::Zuid(zuid) => self.get_user(zuid).await,
            UserIdentifier::Email(email) => self.get_user_by_email(&email).await,
        }
    }
}

pub(crate) async fn organization_id(client: &ZohoClient) -> Result<i64> {
    client
        .zoid_cell()
        .get_or_try_init(|| async {
            let org: Organization = client
                .fetch_data(ApiRequest::get(Service::Api, "/api/organization/"))
                .await?;
            debug!(zoid = org.zoid, "resolved organization id");
            Ok(org.zoid)
        })
        .await
        .copied()
}

async fn list_users_page(client: &ZohoClient, start: usize, limit: usize) -> Result<Vec<User>> {
    let zoid = organization_id(client).await?;
    client
        .fetch_data(ApiRequest::get(
            Service::Api,
            format!("/api/organization/{zoid}/accounts?start={start}&limit={limit}"),
        ))
        .await
}
