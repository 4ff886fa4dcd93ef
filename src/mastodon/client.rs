use log::debug;
use reqwest::Response;
use url::Url;

use crate::error::{BotError, Result};
use crate::types::{Account, Reply, Status};

use super::PostStatus;
use super::streaming::{EventStream, Subscription, events};

const USER_AGENT: &str = concat!("selectbot/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct MastodonClient {
    base_url: Url,
    access_token: String,
    client: reqwest::Client,
}

impl MastodonClient {
    pub fn new(base_url: Url, access_token: String) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            base_url,
            access_token,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Fetch the account the access token belongs to.
    pub async fn verify_credentials(&self) -> Result<Account> {
        let url = self.endpoint("/api/v1/accounts/verify_credentials")?;
        debug!("Verifying credentials against {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    /// Open a streaming session and decode its server-sent events.
    pub async fn stream(
        &self,
        subscription: &Subscription,
    ) -> Result<EventStream> {
        let mut url = self.endpoint(subscription.path())?;
        if let Some((key, value)) = subscription.query() {
            url.query_pairs_mut().append_pair(key, value);
        }
        debug!("Connecting to stream {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?;

        Ok(events(check(response).await?))
    }
}

impl PostStatus for MastodonClient {
    async fn post_status(&self, reply: &Reply) -> Result<()> {
        let url = self.endpoint("/api/v1/statuses")?;
        debug!(
            "Posting reply to {} with visibility {}",
            reply.in_reply_to, reply.visibility
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(reply)
            .send()
            .await?;

        let status: Status = check(response).await?.json().await?;
        debug!("Posted status {}", status.id);
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
    Err(BotError::MastodonApi { status, message })
}
