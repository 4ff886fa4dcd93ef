//! Notification handling: decides what gets a reply and builds it.

use log::{debug, info, warn};
use rand::Rng;

use crate::error::Result;
use crate::mastodon::{PostStatus, StreamEvent};
use crate::selector::select;
use crate::types::{Account, Mention, Message, Notification, NotificationType, Reply, Status};

/// Handles stream events one at a time on behalf of the bot account `me`.
pub struct Listener<P, R> {
    api: P,
    me: Account,
    rng: R,
}

impl<P: PostStatus, R: Rng> Listener<P, R> {
    pub fn new(api: P, me: Account, rng: R) -> Self {
        info!("I am {}", me.acct);
        Self { api, me, rng }
    }

    pub async fn on_event(&mut self, event: StreamEvent) -> Result<Option<Reply>> {
        match event {
            StreamEvent::Notification(notification) => self.on_notification(&notification).await,
            StreamEvent::Update(status) => {
                debug!("Ignoring timeline update {}", status.id);
                Ok(None)
            }
            StreamEvent::Delete(id) => {
                debug!("Ignoring deletion of {}", id);
                Ok(None)
            }
            StreamEvent::Other { event } => {
                debug!("Ignoring '{}' event", event);
                Ok(None)
            }
        }
    }

    /// Reply to mentions; every other notification type is logged and dropped.
    pub async fn on_notification(&mut self, notification: &Notification) -> Result<Option<Reply>> {
        if notification.kind != NotificationType::Mention {
            info!("Unhandled notification: {}", notification.kind);
            return Ok(None);
        }

        let Some(status) = &notification.status else {
            warn!(
                "Mention notification {} from {} carries no status",
                notification.id, notification.account.acct
            );
            return Ok(None);
        };

        info!("{} mentioned me in {}", notification.account.acct, status.id);
        self.handle_status(status).await
    }

    pub async fn handle_status(&mut self, status: &Status) -> Result<Option<Reply>> {
        if status.is_reblog() {
            debug!("Skipping reblogged status {}", status.id);
            return Ok(None);
        }

        if status.account.id == self.me.id {
            debug!("Skipping my own status {}", status.id);
            return Ok(None);
        }

        if !status.mentions_account(&self.me.id) {
            debug!("Status {} does not mention me", status.id);
            return Ok(None);
        }

        let message = Message::from(status);
        debug!("{}: {}", message.author.acct, message.plain_text);

        let reply = self.build_reply(&message);
        info!("Replying to {}", message.author.acct);
        self.api.post_status(&reply).await?;
        info!("Replied to {}: {}", message.author.acct, reply.text);

        Ok(Some(reply))
    }

    /// Build the reply for a message without posting it.
    pub fn build_reply(&mut self, message: &Message) -> Reply {
        let prefix = mention_prefix(&message.author, &message.mentions, &self.me);
        let choice = select(&message.plain_text, &mut self.rng);

        Reply {
            text: format!("{prefix}{choice}"),
            in_reply_to: message.id.clone(),
            visibility: message.visibility.for_reply(),
        }
    }
}

/// `@acct ` for the author and every co-mentioned account except the bot.
fn mention_prefix(author: &Account, mentions: &[Mention], me: &Account) -> String {
    let accts = std::iter::once(author.acct.as_str()).chain(mentions.iter().map(|m| m.acct.as_str()));

    let mut handles: Vec<&str> = Vec::with_capacity(mentions.len() + 1);
    for acct in accts {
        if acct != me.acct && !handles.contains(&acct) {
            handles.push(acct);
        }
    }

    handles.iter().map(|acct| format!("@{acct} ")).collect()
}
