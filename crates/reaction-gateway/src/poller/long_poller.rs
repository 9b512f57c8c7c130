//! Long poller
//!
//! Fetches update batches and dispatches every update on its own task, so
//! one slow platform call never holds up the rest of the chat.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reaction_common::PollerConfig;
use reaction_service::EventRouter;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::telegram::types::Update;
use crate::telegram::{TelegramClient, TelegramResult};

/// Where updates come from
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Fetch updates with ids from `offset` on, waiting up to `timeout`
    async fn get_updates(&self, offset: i64, timeout: Duration) -> TelegramResult<Vec<Update>>;

    /// Acknowledge a button press
    async fn answer_callback(&self, callback_id: &str) -> TelegramResult<()>;
}

#[async_trait]
impl UpdateSource for TelegramClient {
    async fn get_updates(&self, offset: i64, timeout: Duration) -> TelegramResult<Vec<Update>> {
        TelegramClient::get_updates(self, offset, timeout).await
    }

    async fn answer_callback(&self, callback_id: &str) -> TelegramResult<()> {
        self.answer_callback_query(callback_id).await
    }
}

/// Configuration for the long poller
#[derive(Debug, Clone)]
pub struct LongPollerConfig {
    /// How long the platform holds an empty poll open
    pub poll_timeout: Duration,
    /// Pause after a failed poll
    pub reconnect_delay: Duration,
}

impl Default for LongPollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_secs(30),
            reconnect_delay: Duration::from_millis(1000),
        }
    }
}

impl From<&PollerConfig> for LongPollerConfig {
    fn from(config: &PollerConfig) -> Self {
        Self {
            poll_timeout: config.poll_timeout(),
            ..Default::default()
        }
    }
}

/// Long poller feeding the event router
pub struct LongPoller {
    source: Arc<dyn UpdateSource>,
    router: Arc<EventRouter>,
    config: LongPollerConfig,
    /// Whether the poller is running
    running: AtomicBool,
    shutdown: Notify,
    /// Next update id to ask for
    offset: AtomicI64,
}

impl LongPoller {
    /// Create a new long poller
    pub fn new(
        config: LongPollerConfig,
        source: Arc<dyn UpdateSource>,
        router: Arc<EventRouter>,
    ) -> Self {
        Self {
            source,
            router,
            config,
            running: AtomicBool::new(false),
            shutdown: Notify::new(),
            offset: AtomicI64::new(0),
        }
    }

    /// Get the event router
    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    /// Check if the poll loop is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Next update id the poller will ask for
    pub fn offset(&self) -> i64 {
        self.offset.load(Ordering::SeqCst)
    }

    /// Start the poller
    ///
    /// This spawns a background task that polls until [`LongPoller::stop`]
    /// is called.
    pub fn start(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::warn!("Long poller is already running");
            return None;
        }

        let poller = self.clone();
        let handle = tokio::spawn(async move {
            poller.run().await;
        });

        tracing::info!(
            poll_timeout_secs = self.config.poll_timeout.as_secs(),
            "Long poller started"
        );
        Some(handle)
    }

    /// Stop the poller. A poll in flight is abandoned; update handlers
    /// already spawned run to completion.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.shutdown.notify_one();
        tracing::info!("Long poller stopped");
    }

    /// Run the poll loop
    async fn run(&self) {
        while self.is_running() {
            tokio::select! {
                _ = self.shutdown.notified() => break,
                result = self.poll_once() => match result {
                    Ok(_handlers) => {}
                    Err(e) if e.is_timeout() => {
                        tracing::debug!("Poll timed out, polling again");
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            delay_ms = self.config.reconnect_delay.as_millis(),
                            "Polling failed, retrying"
                        );
                        tokio::time::sleep(self.config.reconnect_delay).await;
                    }
                },
            }
        }
    }

    /// Fetch one batch and spawn a handler per update. The offset moves past
    /// every fetched update before any of them is handled.
    pub async fn poll_once(&self) -> TelegramResult<Vec<JoinHandle<()>>> {
        let updates = self
            .source
            .get_updates(self.offset(), self.config.poll_timeout)
            .await?;

        if !updates.is_empty() {
            tracing::debug!(count = updates.len(), "Received updates");
        }

        let handlers = updates
            .into_iter()
            .map(|update| {
                self.offset.fetch_max(update.update_id + 1, Ordering::SeqCst);
                tokio::spawn(Self::dispatch(
                    self.source.clone(),
                    self.router.clone(),
                    update,
                ))
            })
            .collect();
        Ok(handlers)
    }

    /// Route one update, then answer its button press if it was one
    async fn dispatch(source: Arc<dyn UpdateSource>, router: Arc<EventRouter>, update: Update) {
        let update_id = update.update_id;
        let callback_id = update.callback_id().map(str::to_owned);

        match update.into_event() {
            // Failures are logged by the router
            Some(event) => {
                let _outcome = router.handle(event).await;
            }
            None => tracing::trace!(update_id, "Update carries nothing to route"),
        }

        if let Some(callback_id) = callback_id {
            if let Err(e) = source.answer_callback(&callback_id).await {
                tracing::warn!(update_id, error = %e, "Failed to answer callback query");
            }
        }
    }
}

impl std::fmt::Debug for LongPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LongPoller")
            .field("config", &self.config)
            .field("running", &self.is_running())
            .field("offset", &self.offset())
            .finish()
    }
}
