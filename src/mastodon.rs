//! Thin Mastodon REST and streaming client.

mod client;
mod streaming;

use std::future::Future;

use crate::error::Result;
use crate::types::Reply;

pub use client::MastodonClient;
pub use streaming::{StreamEvent, Subscription};

/// Anything the bot can publish replies through.
pub trait PostStatus {
    fn post_status(&self, reply: &Reply) -> impl Future<Output = Result<()>> + Send;
}
