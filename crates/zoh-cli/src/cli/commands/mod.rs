//! Command implementations.

pub mod admin;
pub mod auth;
pub mod config;
pub mod mail;
pub mod mail_admin;

use tokio_util::sync::CancellationToken;
use zoh_client::{Region, StaticToken, ZohoClient};

use crate::cli::args::PageArgs;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// OAuth access token
    pub access_token: Option<String>,

    /// Data center
    pub region: Region,

    /// Output format
    pub output_format: OutputFormat,

    /// Entries per request for `--all` listings
    pub page_size: usize,

    /// Fired on Ctrl-C
    pub cancel: CancellationToken,
}

impl Context {
    /// Get the access token, returning an error if not set.
    pub fn require_token(&self) -> anyhow::Result<&str> {
        self.access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Access token required.\n\n\
                     Set it with one of:\n  \
                     1. --token <TOKEN>\n  \
                     2. ZOH_ACCESS_TOKEN environment variable\n  \
                     3. zoh config set access_token <TOKEN>"
                )
            })
    }

    /// Create a Zoho client for the configured token and region.
    pub fn client(&self) -> anyhow::Result<ZohoClient> {
        let token = self.require_token()?;
        Ok(ZohoClient::builder(StaticToken::new(token))
            .region(self.region)
            .cancellation(self.cancel.clone())
            .build()?)
    }
}

/// How a list command should page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Every page, `page_size` at a time
    All { page_size: usize },
    /// One request
    Page { start: usize, limit: usize },
}

impl Listing {
    /// Resolve paging flags against the configured page size
    pub fn from_args(args: PageArgs, page_size: usize) -> Self {
        if args.all {
            Self::All { page_size }
        } else {
            Self::Page {
                start: args.start,
                limit: args.limit.unwrap_or(page_size),
            }
        }
    }
}
