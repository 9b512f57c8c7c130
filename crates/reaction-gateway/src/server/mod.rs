//! Bot setup
//!
//! Wires the Bot API client, services and poller together and runs them
//! until interrupted.

mod state;

pub use state::GatewayState;

use std::sync::Arc;

use reaction_codec::PostCodec;
use reaction_common::{AppConfig, AppError};
use reaction_service::{EventRouter, ServiceContextBuilder};

use crate::poller::{LongPoller, LongPollerConfig};
use crate::scanner::UnicodeEmojiScanner;
use crate::telegram::TelegramClient;

/// Initialize all dependencies and create `GatewayState`
pub async fn create_gateway_state(config: AppConfig) -> Result<GatewayState, AppError> {
    let client = TelegramClient::new(&config.bot, config.poller.request_timeout())
        .map_err(AppError::transport)?;
    let client = Arc::new(client);

    tracing::info!("Connecting to the Bot API...");
    let me = client.get_me().await.map_err(AppError::transport)?;
    tracing::info!(bot_id = %me.id, bot = %me.display_name(), "Bot API connection established");

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .transport(client.clone())
        .scanner(Arc::new(UnicodeEmojiScanner::new()))
        .bot_id(me.id)
        .codec(PostCodec::new(config.post.layout, config.post.max_message_length))
        .verbose(config.app.verbose)
        .build()?;

    let router = Arc::new(EventRouter::new(service_context));
    let poller = Arc::new(LongPoller::new(
        LongPollerConfig::from(&config.poller),
        client.clone(),
        router.clone(),
    ));

    Ok(GatewayState::new(me, client, router, poller, config))
}

/// Run the bot until Ctrl-C
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let state = create_gateway_state(config).await?;

    let handle = state.poller().clone().start();
    tracing::info!(bot = %state.me().display_name(), "Reaction bot running");

    let signal = tokio::signal::ctrl_c().await;
    state.poller().stop();
    if let Some(handle) = handle {
        handle.await.map_err(AppError::internal)?;
    }
    signal.map_err(AppError::internal)?;

    tracing::info!("Reaction bot shut down");
    Ok(())
}
