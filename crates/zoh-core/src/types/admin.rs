use serde::{Deserialize, Serialize};

/// Organization details from `/api/organization/`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Organization id used in every admin path
    pub zoid: i64,

    /// Organization name
    #[serde(default)]
    pub company_name: Option<String>,

    /// Primary domain
    #[serde(default)]
    pub domain_name: Option<String>,

    /// Licensed user seats
    #[serde(default)]
    pub user_count: Option<u32>,
}

/// A user account in the organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Zoho user id
    #[serde(default)]
    pub zuid: i64,

    /// Mail account id
    #[serde(default)]
    pub account_id: Option<String>,

    /// Primary email address
    #[serde(default)]
    pub email_address: String,

    /// Name shown in the admin console
    #[serde(default)]
    pub display_name: String,

    /// First name
    #[serde(default)]
    pub first_name: Option<String>,

    /// Last name
    #[serde(default)]
    pub last_name: Option<String>,

    /// Role (`super_admin`, `admin`, `member`)
    #[serde(default)]
    pub role: String,

    /// Mailbox state (`enabled`, `disabled`, ...)
    #[serde(default)]
    pub mailbox_status: String,
}

impl User {
    /// Returns true if the user's address matches, ignoring ASCII case
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.email_address.eq_ignore_ascii_case(email)
    }
}

/// How a user was identified on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdentifier {
    /// Numeric Zoho user id
    Zuid(i64),
    /// Email address
    Email(String),
}

impl UserIdentifier {
    /// Numeric input is a zuid, anything else is treated as an email address
    #[must_use]
    pub fn parse(input: &str) -> Self {
        input
            .trim()
            .parse::<i64>()
            .map_or_else(|_| Self::Email(input.trim().to_string()), Self::Zuid)
    }
}

impl std::fmt::Display for UserIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zuid(zuid) => write!(f, "{zuid}"),
            Self::Email(email) => write!(f, "{email}"),
        }
    }
}
