use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Organization-wide spam list categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpamCategory {
    /// Sender addresses that always bypass spam filtering
    #[serde(rename = "whiteListEmail")]
    AllowEmail,
    /// Sender domains that always bypass spam filtering
    #[serde(rename = "whiteListDomain")]
    AllowDomain,
    /// Sender addresses that are always treated as spam
    #[serde(rename = "blackListEmail")]
    BlockEmail,
    /// Sender domains that are always treated as spam
    #[serde(rename = "blackListDomain")]
    BlockDomain,
}

impl SpamCategory {
    /// Wire name used by the API
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllowEmail => "whiteListEmail",
            Self::AllowDomain => "whiteListDomain",
            Self::BlockEmail => "blackListEmail",
            Self::BlockDomain => "blackListDomain",
        }
    }
}

impl std::fmt::Display for SpamCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpamCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "allow-email" | "whitelistemail" => Ok(Self::AllowEmail),
            "allow-domain" | "whitelistdomain" => Ok(Self::AllowDomain),
            "block-email" | "blacklistemail" => Ok(Self::BlockEmail),
            "block-domain" | "blacklistdomain" => Ok(Self::BlockDomain),
            _ => Err(format!(
                "unknown spam category: {s} (expected allow-email, allow-domain, block-email or block-domain)"
            )),
        }
    }
}

/// Body of a spam list update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamUpdateRequest {
    /// Category being replaced
    pub spam_category: SpamCategory,

    /// Full list of values
    pub value: Vec<String>,
}

/// One delivery log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryLog {
    /// Message id
    #[serde(default)]
    pub message_id: String,

    /// Sender
    #[serde(default)]
    pub from_address: String,

    /// Recipient
    #[serde(default)]
    pub to_address: String,

    /// Subject line
    #[serde(default)]
    pub subject: String,

    /// Delivery status
    #[serde(default)]
    pub status: String,

    /// Unix milliseconds
    #[serde(default)]
    pub sent_time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spam_category_parse() {
        assert_eq!("block-domain".parse::<SpamCategory>().unwrap(), SpamCategory::BlockDomain);
        assert_eq!("whiteListEmail".parse::<SpamCategory>().unwrap(), SpamCategory::AllowEmail);
        assert!("spam".parse::<SpamCategory>().is_err());
    }

    #[test]
    fn test_update_request_wire_format() {
        let req = SpamUpdateRequest {
            spam_category: SpamCategory::BlockEmail,
            value: vec!["spam@example.com".into()],
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"spamCategory":"blackListEmail","value":["spam@example.com"]}"#
        );
    }
}
