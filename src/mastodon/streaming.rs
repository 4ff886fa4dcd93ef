//! Streaming API subscriptions and server-sent event decoding.

use std::fmt;
use std::str::FromStr;

use eventsource_stream::Eventsource;
use futures::StreamExt;
use futures::stream::BoxStream;
use log::debug;
use reqwest::Response;

use crate::error::{BotError, Result};
use crate::types::{Notification, Status};

pub type EventStream = BoxStream<'static, Result<StreamEvent>>;

/// Which timeline a streaming session follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subscription {
    /// Home timeline and notifications of the authenticated account
    User,
    /// Notifications of the authenticated account only
    UserNotification,
    /// Public statuses from this server
    Local,
    /// All public statuses the server knows about
    Public,
    /// Public statuses carrying a hashtag (without the `#`)
    Hashtag(String),
}

impl Subscription {
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Subscription::User => "/api/v1/streaming/user",
            Subscription::UserNotification => "/api/v1/streaming/user/notification",
            Subscription::Local => "/api/v1/streaming/public/local",
            Subscription::Public => "/api/v1/streaming/public",
            Subscription::Hashtag(_) => "/api/v1/streaming/hashtag",
        }
    }

    #[must_use]
    pub fn query(&self) -> Option<(&'static str, &str)> {
        match self {
            Subscription::Hashtag(tag) => Some(("tag", tag.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subscription::User => f.write_str("user"),
            Subscription::UserNotification => f.write_str("user:notification"),
            Subscription::Local => f.write_str("local"),
            Subscription::Public => f.write_str("public"),
            Subscription::Hashtag(tag) => write!(f, "hashtag:{tag}"),
        }
    }
}

impl FromStr for Subscription {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(tag) = s.strip_prefix("hashtag:") {
            let tag = tag.trim().trim_start_matches('#');
            if tag.is_empty() {
                return Err(BotError::Config("hashtag stream needs a tag".to_string()));
            }
            return Ok(Subscription::Hashtag(tag.to_string()));
        }

        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Subscription::User),
            "user:notification" | "notification" => Ok(Subscription::UserNotification),
            "local" => Ok(Subscription::Local),
            "public" => Ok(Subscription::Public),
            other => Err(BotError::Config(format!("unknown stream '{other}'"))),
        }
    }
}

/// One decoded event of a streaming session.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    Notification(Box<Notification>),
    /// New status on the followed timeline
    Update(Box<Status>),
    /// Id of a deleted status
    Delete(String),
    /// Event types the bot does not act on
    Other { event: String },
}

impl StreamEvent {
    /// Decode an event from its SSE `event` name and `data` payload.
    pub fn decode(event: &str, data: &str) -> Result<Self> {
        match event {
            "notification" => Ok(StreamEvent::Notification(Box::new(serde_json::from_str(
                data,
            )?))),
            "update" => Ok(StreamEvent::Update(Box::new(serde_json::from_str(data)?))),
            "delete" => Ok(StreamEvent::Delete(data.trim().to_string())),
            other => Ok(StreamEvent::Other {
                event: other.to_string(),
            }),
        }
    }
}

/// Turn a streaming response body into decoded events.
pub fn events(response: Response) -> EventStream {
    response
        .bytes_stream()
        .eventsource()
        .map(|event| match event {
            Ok(event) => {
                debug!("Stream event: {}", event.event);
                StreamEvent::decode(&event.event, &event.data)
            }
            Err(e) => Err(BotError::Stream(e.to_string())),
        })
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NotificationType;

    #[test]
    fn parses_subscriptions() -> Result<()> {
        assert_eq!("user".parse::<Subscription>()?, Subscription::User);
        assert_eq!(" LOCAL ".parse::<Subscription>()?, Subscription::Local);
        assert_eq!(
            "notification".parse::<Subscription>()?,
            Subscription::UserNotification
        );
        assert_eq!(
            "hashtag:#rustlang".parse::<Subscription>()?,
            Subscription::Hashtag("rustlang".to_string())
        );
        assert!("hashtag:".parse::<Subscription>().is_err());
        assert!("firehose".parse::<Subscription>().is_err());
        Ok(())
    }

    #[test]
    fn display_round_trips_through_parse() -> Result<()> {
        for subscription in [
            Subscription::User,
            Subscription::UserNotification,
            Subscription::Local,
            Subscription::Public,
            Subscription::Hashtag("선택".to_string()),
        ] {
            assert_eq!(subscription.to_string().parse::<Subscription>()?, subscription);
        }
        Ok(())
    }

    #[test]
    fn hashtag_stream_carries_tag_query() {
        let subscription = Subscription::Hashtag("rust".to_string());
        assert_eq!(subscription.path(), "/api/v1/streaming/hashtag");
        assert_eq!(subscription.query(), Some(("tag", "rust")));
        assert_eq!(Subscription::User.query(), None);
    }

    #[test]
    fn decodes_notification_event() -> Result<()> {
        let data = r#"{"id":"1","type":"follow","account":{"id":"2","username":"a","acct":"a@example.social"}}"#;
        match StreamEvent::decode("notification", data)? {
            StreamEvent::Notification(notification) => {
                assert_eq!(notification.kind, NotificationType::Follow);
                assert!(notification.status.is_none());
            }
            other => panic!("unexpected event {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn decodes_delete_and_unknown_events() -> Result<()> {
        assert!(matches!(
            StreamEvent::decode("delete", "103186126728896492")?,
            StreamEvent::Delete(id) if id == "103186126728896492"
        ));
        assert!(matches!(
            StreamEvent::decode("filters_changed", "")?,
            StreamEvent::Other { event } if event == "filters_changed"
        ));
        Ok(())
    }

    #[test]
    fn malformed_payload_is_json_error() {
        assert!(matches!(
            StreamEvent::decode("notification", "{not json"),
            Err(BotError::Json(_))
        ));
    }
}
