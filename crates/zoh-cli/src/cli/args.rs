//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use zoh_client::Region;
use zoh_core::SpamCategory;

use crate::output::OutputFormat;

/// Command-line interface for Zoho Mail administration
///
/// Lists users, mailboxes and organization mail settings through the Zoho
/// REST API, staying inside Zoho's request budget.
///
/// Needs an OAuth access token with the ZohoMail scopes you intend to use.
#[derive(Parser, Debug)]
#[command(name = "zoh")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// OAuth access token (or set ZOH_ACCESS_TOKEN env var)
    #[arg(short = 't', long, env = "ZOH_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Zoho data center (us, eu, in, au, jp, ca, cn, sa)
    #[arg(short, long, env = "ZOH_REGION", global = true)]
    pub region: Option<Region>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Log requests, retries and rate limiting to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Organization administration
    Admin(AdminArgs),

    /// Mailbox and organization mail settings
    Mail(MailArgs),

    /// Access token information
    Auth(AuthArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

/// Paging flags shared by list commands
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Maximum number of entries to fetch
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Offset of the first entry
    #[arg(long, default_value = "0")]
    pub start: usize,

    /// Fetch every page
    #[arg(long, conflicts_with_all = ["limit", "start"])]
    pub all: bool,
}

// ============================================================================
// Admin command
// ============================================================================

#[derive(Args, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommands,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Show the organization
    Org,

    /// Organization users
    Users(UsersArgs),
}

#[derive(Args, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List(PageArgs),

    /// Show one user by zuid or email address
    Get {
        /// Numeric zuid or email address
        identifier: String,
    },
}

// ============================================================================
// Mail command
// ============================================================================

#[derive(Args, Debug)]
pub struct MailArgs {
    #[command(subcommand)]
    pub command: MailCommands,
}

#[derive(Subcommand, Debug)]
pub enum MailCommands {
    /// Mail accounts owned by the token's user
    Accounts,

    /// Folders of the primary account
    Folders,

    /// Labels of the primary account
    Labels,

    /// Messages of the primary account
    Messages(MessagesArgs),

    /// Organization-wide mail settings
    Admin(MailAdminArgs),
}

#[derive(Args, Debug)]
pub struct MessagesArgs {
    #[command(subcommand)]
    pub command: MessageCommands,
}

#[derive(Subcommand, Debug)]
pub enum MessageCommands {
    /// List messages in a folder
    List {
        /// Folder name (e.g. Inbox) or numeric folder id
        folder: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one message
    Get {
        /// Folder id
        folder_id: String,

        /// Message id
        message_id: String,

        /// Print the message body instead of its headers
        #[arg(long)]
        content: bool,
    },
}

// ============================================================================
// Mail admin command
// ============================================================================

#[derive(Args, Debug)]
pub struct MailAdminArgs {
    #[command(subcommand)]
    pub command: MailAdminCommands,
}

#[derive(Subcommand, Debug)]
pub enum MailAdminCommands {
    /// Spam allow and block lists
    Spam(SpamArgs),

    /// Show the retention policy
    Retention,

    /// Delivery logs
    Logs(PageArgs),
}

#[derive(Args, Debug)]
pub struct SpamArgs {
    #[command(subcommand)]
    pub command: SpamCommands,
}

#[derive(Subcommand, Debug)]
pub enum SpamCommands {
    /// Show one list
    Get {
        /// allow-email, allow-domain, block-email or block-domain
        category: SpamCategory,
    },

    /// Replace the entries of one list
    Set {
        /// allow-email, allow-domain, block-email or block-domain
        category: SpamCategory,

        /// New entries
        #[arg(required = true)]
        values: Vec<String>,
    },
}

// ============================================================================
// Auth command
// ============================================================================

#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Show scopes and expiry of the access token
    Info,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (access_token, region, output_format, page_size)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_spam_set() {
        let cli = Cli::try_parse_from([
            "zoh", "mail", "admin", "spam", "set", "block-domain", "a.test", "b.test",
        ])
        .unwrap();

        match cli.command {
            Commands::Mail(MailArgs {
                command:
                    MailCommands::Admin(MailAdminArgs {
                        command: MailAdminCommands::Spam(SpamArgs {
                            command: SpamCommands::Set { category, values },
                        }),
                    }),
            }) => {
                assert_eq!(category, SpamCategory::BlockDomain);
                assert_eq!(values, ["a.test", "b.test"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_all_conflicts_with_limit() {
        let err = Cli::try_parse_from(["zoh", "admin", "users", "list", "--all", "--limit", "5"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_region_flag() {
        let cli = Cli::try_parse_from(["zoh", "--region", "eu", "auth", "info"]).unwrap();
        assert_eq!(cli.region, Some(Region::Eu));
    }
}
