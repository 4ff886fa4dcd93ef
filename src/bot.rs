//! Bot lifecycle: identity lookup, streaming sessions and reconnects.

use std::time::Duration;

use futures::{Stream, StreamExt};
use log::{debug, error, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::Config;
use crate::error::{BotError, Result};
use crate::listener::Listener;
use crate::mastodon::{MastodonClient, PostStatus, StreamEvent, Subscription};
use crate::types::Account;

/// Pause between reconnect attempts.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

type BotListener = Listener<MastodonClient, StdRng>;

/// Run the bot until Ctrl-C or a fatal error.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing Mastodon client");
    let client = MastodonClient::new(config.base_url.clone(), config.access_token.clone())?;

    tokio::select! {
        result = serve(&client, &config.subscription) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    Ok(())
}

async fn serve(client: &MastodonClient, subscription: &Subscription) -> Result<()> {
    let me = identify(client).await?;
    let mut listener = Listener::new(client.clone(), me, StdRng::from_os_rng());
    info!("Start selectbot");

    loop {
        match run_session(client, subscription, &mut listener).await {
            Ok(()) => warn!("Streaming session closed by server"),
            Err(e) if e.is_fatal() => {
                error!("Streaming session failed permanently: {}", e);
                return Err(e);
            }
            Err(e) => warn!("Streaming session failed: {}", e),
        }

        info!("Reconnecting in {} seconds", RECONNECT_DELAY.as_secs());
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

/// Fetch the bot's own account, retrying until the server answers.
async fn identify(client: &MastodonClient) -> Result<Account> {
    loop {
        match client.verify_credentials().await {
            Ok(me) => return Ok(me),
            Err(e) if e.is_fatal() => {
                error!("Failed to verify credentials: {}", e);
                return Err(e);
            }
            Err(e) => {
                warn!(
                    "Failed to verify credentials, retrying in {} seconds: {}",
                    RECONNECT_DELAY.as_secs(),
                    e
                );
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

/// Open one streaming session and handle it until it ends or fails.
async fn run_session(
    client: &MastodonClient,
    subscription: &Subscription,
    listener: &mut BotListener,
) -> Result<()> {
    info!("Opening {} stream", subscription);
    let events = client.stream(subscription).await?;
    info!("Streaming session established");

    handle_events(events, listener).await
}

/// Feed stream events to the listener one at a time.
///
/// Undecodable events and per-notification API errors are logged and
/// skipped; transport and authentication errors end the session.
async fn handle_events<S, P, R>(mut events: S, listener: &mut Listener<P, R>) -> Result<()>
where
    S: Stream<Item = Result<StreamEvent>> + Unpin,
    P: PostStatus,
    R: Rng,
{
    while let Some(event) = events.next().await {
        let event = match event {
            Ok(event) => event,
            Err(BotError::Json(e)) => {
                warn!("Dropping undecodable stream event: {}", e);
                continue;
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = listener.on_event(event).await {
            if e.is_network() || e.is_fatal() {
                return Err(e);
            }
            error!("Failed to handle stream event: {}", e);
        }
    }

    Ok(())
}
