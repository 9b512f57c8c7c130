//! Bot API client
//!
//! Every method is a JSON POST to `{api_url}/bot{token}/{method}`. The token
//! is part of the URL, so request URLs are stripped from errors before they
//! can reach a log line.

use std::time::Duration;

use async_trait::async_trait;
use reaction_common::BotConfig;
use reaction_core::{
    ChatId, Envelope, MessageRef, OutgoingMessage, Sender, Transport, TransportResult,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{TelegramError, TelegramResult};
use super::types::{
    AnswerCallbackQueryRequest, ApiResponse, DeleteMessageRequest, EditMessageTextRequest,
    EmptyRequest, ForwardMessageRequest, GetUpdatesRequest, Message, SendMessageRequest, Update,
    User,
};

/// Update kinds the bot subscribes to
const ALLOWED_UPDATES: &[&str] = &["message", "channel_post", "callback_query"];

/// Telegram Bot API client
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    /// `{api_url}/bot{token}`
    base_url: String,
    /// Deadline of one call; long polls get their poll timeout on top
    request_timeout: Duration,
}

impl TelegramClient {
    /// Create a new client. `request_timeout` bounds every call; a long poll
    /// may additionally take as long as its poll timeout.
    pub fn new(config: &BotConfig, request_timeout: Duration) -> TelegramResult<Self> {
        let http = reqwest::Client::builder().build().map_err(strip_url)?;

        Ok(Self {
            http,
            base_url: format!("{}/bot{}", config.api_url, config.token),
            request_timeout,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    /// Call a Bot API method
    pub async fn call<R, T>(&self, method: &'static str, body: &R) -> TelegramResult<T>
    where
        R: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call_with_deadline(method, body, self.request_timeout)
            .await
    }

    /// Call a Bot API method that may take up to `deadline` to answer
    pub async fn call_with_deadline<R, T>(
        &self,
        method: &'static str,
        body: &R,
        deadline: Duration,
    ) -> TelegramResult<T>
    where
        R: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::trace!(method, deadline_ms = deadline.as_millis() as u64, "Bot API call");

        // Errors come back as JSON with a non-2xx status, so the status
        // itself is not checked
        let response: ApiResponse<T> = self
            .http
            .post(self.method_url(method))
            .timeout(deadline)
            .json(body)
            .send()
            .await
            .map_err(strip_url)?
            .json()
            .await
            .map_err(strip_url)?;

        response.into_result(method)
    }

    /// The bot's own account
    pub async fn get_me(&self) -> TelegramResult<Sender> {
        let me: User = self.call("getMe", &EmptyRequest {}).await?;
        Ok(me.into())
    }

    /// Long-poll for updates with ids from `offset` on. The server may hold
    /// the request for `timeout` before answering with nothing.
    pub async fn get_updates(&self, offset: i64, timeout: Duration) -> TelegramResult<Vec<Update>> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call_with_deadline("getUpdates", &request, self.request_timeout + timeout)
            .await
    }

    /// Acknowledge a button press so the client stops its spinner
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> TelegramResult<()> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &AnswerCallbackQueryRequest { callback_query_id },
            )
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &"[REDACTED]")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &'static str) -> TelegramResult<T> {
        if !self.ok {
            return Err(TelegramError::Api {
                code: self.error_code,
                description: self
                    .description
                    .unwrap_or_else(|| format!("{method} failed")),
            });
        }
        self.result.ok_or(TelegramError::MissingResult(method))
    }
}

fn strip_url(err: reqwest::Error) -> TelegramError {
    TelegramError::Http(err.without_url())
}

#[async_trait]
impl Transport for TelegramClient {
    async fn send(
        &self,
        chat_id: ChatId,
        message: &OutgoingMessage,
        reply_to: Option<MessageRef>,
    ) -> TransportResult<Envelope> {
        let request = SendMessageRequest::new(chat_id, message, reply_to.map(|r| r.message_id));
        let sent: Message = self.call("sendMessage", &request).await?;
        Ok(sent.into())
    }

    async fn edit(&self, target: MessageRef, message: &OutgoingMessage) -> TransportResult<Envelope> {
        let request = EditMessageTextRequest::new(target.chat_id, target.message_id, message);
        let edited: Message = self.call("editMessageText", &request).await?;
        Ok(edited.into())
    }

    async fn delete(&self, target: MessageRef) -> TransportResult<()> {
        let request = DeleteMessageRequest {
            chat_id: target.chat_id.into_inner(),
            message_id: target.message_id.into_inner(),
        };
        let _: bool = self.call("deleteMessage", &request).await?;
        Ok(())
    }

    async fn forward(&self, to: ChatId, source: MessageRef) -> TransportResult<Envelope> {
        let request = ForwardMessageRequest {
            chat_id: to.into_inner(),
            from_chat_id: source.chat_id.into_inner(),
            message_id: source.message_id.into_inner(),
            disable_notification: false,
        };
        let forwarded: Message = self.call("forwardMessage", &request).await?;
        Ok(forwarded.into())
    }
}
