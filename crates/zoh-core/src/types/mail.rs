use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A mailbox the token owner can access
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailAccount {
    /// Account id used in every mail path
    pub account_id: String,

    /// Primary address
    #[serde(default)]
    pub email_address: String,

    /// Display name
    #[serde(default)]
    pub account_display_name: String,

    /// Account type
    #[serde(default, rename = "type")]
    pub kind: String,

    /// Account status
    #[serde(default)]
    pub status: String,
}

/// A mail folder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Folder id
    pub folder_id: String,

    /// Folder name
    pub folder_name: String,

    /// Folder type (`Inbox`, `Sent`, ...)
    #[serde(default)]
    pub folder_type: String,

    /// Path from the mailbox root
    #[serde(default)]
    pub path: String,

    /// Unread messages
    #[serde(default)]
    pub unread_count: u32,

    /// All messages
    #[serde(default)]
    pub message_count: u32,
}

/// A mail label
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Label id
    pub label_id: String,

    /// Label name
    pub label_name: String,

    /// Hex color
    #[serde(default)]
    pub label_color: String,
}

/// A message as listed in a folder view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummary {
    /// Message id
    pub message_id: String,

    /// Thread id
    #[serde(default)]
    pub thread_id: Option<String>,

    /// Subject line
    #[serde(default)]
    pub subject: String,

    /// Sender address
    #[serde(default)]
    pub from_address: String,

    /// Sender display name
    #[serde(default)]
    pub sender: String,

    /// Unix milliseconds
    #[serde(default)]
    pub received_time: i64,

    /// `READ` or `UNREAD`
    #[serde(default)]
    pub status: String,

    /// Whether attachments exist
    #[serde(default)]
    pub has_attachment: bool,

    /// Flag id
    #[serde(default, rename = "flagid")]
    pub flag_id: i32,

    /// Priority
    #[serde(default)]
    pub priority: i32,

    /// Preview text
    #[serde(default)]
    pub summary: String,
}

impl MessageSummary {
    /// Received time as a UTC timestamp
    #[must_use]
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.received_time)
    }
}

/// Full message metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    /// Message id
    pub message_id: String,

    /// Thread id
    #[serde(default)]
    pub thread_id: Option<String>,

    /// Owning folder
    #[serde(default)]
    pub folder_id: String,

    /// Subject line
    #[serde(default)]
    pub subject: String,

    /// Sender address
    #[serde(default)]
    pub from_address: String,

    /// Sender display name
    #[serde(default)]
    pub sender: String,

    /// Recipients
    #[serde(default)]
    pub to_address: String,

    /// Carbon copies
    #[serde(default)]
    pub cc_address: String,

    /// Unix milliseconds
    #[serde(default, rename = "sentDateInGMT")]
    pub sent_date_in_gmt: i64,

    /// Unix milliseconds
    #[serde(default)]
    pub received_time: i64,

    /// Size in bytes
    #[serde(default)]
    pub message_size: i64,

    /// Whether attachments exist
    #[serde(default)]
    pub has_attachment: bool,

    /// Whether inline parts exist
    #[serde(default)]
    pub has_inline: bool,

    /// `READ` or `UNREAD`
    #[serde(default)]
    pub status: String,

    /// Priority
    #[serde(default)]
    pub priority: i32,

    /// Flag id
    #[serde(default, rename = "flagid")]
    pub flag_id: i32,
}

impl MessageMetadata {
    /// Sent time as a UTC timestamp
    #[must_use]
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.sent_date_in_gmt)
    }
}

/// HTML body of a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContent {
    /// Message id
    pub message_id: String,

    /// HTML body
    #[serde(default)]
    pub content: String,
}
