//! Mastodon entities and the bot's own message/reply records.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::content::plain_text;

/// Audience scope of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
    /// Visible to everyone, shown in public timelines
    Public,
    /// Visible to everyone, hidden from public timelines
    Unlisted,
    /// Followers only
    Private,
    /// Mentioned accounts only
    Direct,
}

impl Visibility {
    /// Visibility used when replying to a status with this visibility.
    ///
    /// Public posts are answered unlisted so the bot does not flood timelines.
    #[must_use]
    pub fn for_reply(self) -> Self {
        match self {
            Visibility::Public => Visibility::Unlisted,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub acct: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Mention {
    pub id: String,
    pub username: String,
    pub acct: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    pub id: String,
    /// HTML body
    #[serde(default)]
    pub content: String,
    pub visibility: Visibility,
    pub account: Account,
    #[serde(default)]
    pub mentions: Vec<Mention>,
    #[serde(default)]
    pub reblog: Option<Box<Status>>,
}

impl Status {
    #[must_use]
    pub fn is_reblog(&self) -> bool {
        self.reblog.is_some()
    }

    #[must_use]
    pub fn mentions_account(&self, account_id: &str) -> bool {
        self.mentions.iter().any(|mention| mention.id == account_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationType {
    Mention,
    Status,
    Reblog,
    Follow,
    FollowRequest,
    Favourite,
    Poll,
    Update,
    #[serde(rename = "admin.sign_up")]
    #[strum(serialize = "admin.sign_up")]
    AdminSignUp,
    #[serde(rename = "admin.report")]
    #[strum(serialize = "admin.report")]
    AdminReport,
    /// Any type this bot does not know about
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub account: Account,
    #[serde(default)]
    pub status: Option<Status>,
}

/// Inbound mention as seen by the selector: plain text plus addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub author: Account,
    pub mentions: Vec<Mention>,
    pub visibility: Visibility,
    pub plain_text: String,
}

impl From<&Status> for Message {
    fn from(status: &Status) -> Self {
        Self {
            id: status.id.clone(),
            author: status.account.clone(),
            mentions: status.mentions.clone(),
            visibility: status.visibility,
            plain_text: plain_text(&status.content),
        }
    }
}

/// Status the bot posts in answer to a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    #[serde(rename = "status")]
    pub text: String,
    #[serde(rename = "in_reply_to_id")]
    pub in_reply_to: String,
    pub visibility: Visibility,
}
