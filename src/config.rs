use std::env;

use log::{debug, error, info};
use url::Url;

use crate::error::{BotError, Result};
use crate::mastodon::Subscription;

/// Server the bot lives on when `MASTODON_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://daydream.ink";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    /// OAuth app credentials. Requests only need `access_token`; these are
    /// required so a misconfigured deployment fails at startup.
    pub client_key: String,
    pub client_secret: String,
    pub access_token: String,
    pub subscription: Subscription,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        let client_key = required("CLIENT_KEY")?;
        let client_secret = required("CLIENT_SECRET")?;
        let access_token = required("ACCESS_TOKEN")?;

        Self::build(
            client_key,
            client_secret,
            access_token,
            env::var("MASTODON_BASE_URL").ok(),
            env::var("STREAM").ok(),
        )
    }

    fn build(
        client_key: String,
        client_secret: String,
        access_token: String,
        base_url: Option<String>,
        stream: Option<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)).map_err(|e| {
            error!("Failed to parse MASTODON_BASE_URL: {}", e);
            e
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(BotError::Config(format!(
                "MASTODON_BASE_URL must be an http(s) URL, got {base_url}"
            )));
        }

        let subscription = match stream {
            Some(value) => value.parse::<Subscription>().map_err(|e| {
                error!("Failed to parse STREAM: {}", e);
                e
            })?,
            None => Subscription::User,
        };

        info!("Configuration loaded successfully");
        debug!("Mastodon server: {}", base_url);
        debug!("Client key length: {} characters", client_key.len());
        debug!("Client secret length: {} characters", client_secret.len());
        debug!("Access token length: {} characters", access_token.len());
        debug!("Stream subscription: {}", subscription);

        Ok(Self {
            base_url,
            client_key,
            client_secret,
            access_token,
            subscription,
        })
    }
}

fn required(name: &str) -> Result<String> {
    let value = env::var(name).map_err(|e| {
        error!("Failed to load {} from environment: {}", name, e);
        e
    })?;
    if value.trim().is_empty() {
        error!("{} is set but empty", name);
        return Err(BotError::Config(format!("{name} must not be empty")));
    }
    Ok(value)
}
