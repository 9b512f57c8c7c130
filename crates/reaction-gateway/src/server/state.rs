//! Gateway state
//!
//! Shared dependencies of a running bot.

use std::sync::Arc;

use reaction_common::AppConfig;
use reaction_core::Sender;
use reaction_service::EventRouter;

use crate::poller::LongPoller;
use crate::telegram::TelegramClient;

/// Gateway application state
#[derive(Clone)]
pub struct GatewayState {
    /// The bot's own account
    me: Sender,
    client: Arc<TelegramClient>,
    router: Arc<EventRouter>,
    poller: Arc<LongPoller>,
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(
        me: Sender,
        client: Arc<TelegramClient>,
        router: Arc<EventRouter>,
        poller: Arc<LongPoller>,
        config: AppConfig,
    ) -> Self {
        Self {
            me,
            client,
            router,
            poller,
            config: Arc::new(config),
        }
    }

    /// Get the bot's own account
    pub fn me(&self) -> &Sender {
        &self.me
    }

    /// Get the Bot API client
    pub fn client(&self) -> &TelegramClient {
        &self.client
    }

    /// Get the event router
    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    /// Get the long poller
    pub fn poller(&self) -> &Arc<LongPoller> {
        &self.poller
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("me", &self.me.display_name())
            .field("poller", &self.poller)
            .field("config", &"AppConfig")
            .finish()
    }
}
