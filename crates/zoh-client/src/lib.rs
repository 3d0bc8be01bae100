//! Rate-governed HTTP client for the Zoho Mail and organization APIs.
//!
//! Every request made through a [`ZohoClient`] passes through one shared
//! token-bucket limiter, is retried when Zoho answers `429 Too Many Requests`,
//! and can be abandoned through a cancellation token. List endpoints are
//! exposed both page by page and through a [`PageIterator`].
//!
//! ```rust,ignore
//! use zoh_client::ZohoClient;
//!
//! let client = ZohoClient::new("1000.xxxx")?;
//! for user in client.admin().all_users().await? {
//!     println!("{}", user.email_address);
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/zoh-client/0.3.0")]

mod client;
mod config;
pub mod api;
pub mod auth;
pub mod executor;
pub mod limiter;
pub mod pagination;
pub mod transport;

pub use auth::{StaticToken, TokenSource};
pub use client::{ZohoClient, ZohoClientBuilder};
pub use config::*;
pub use limiter::TokenBucketLimiter;
pub use pagination::{PageIterator, PageSource, DEFAULT_PAGE_SIZE};
pub use tokio_util::sync::CancellationToken;
pub use zoh_core::{Result, ZohError};
