//! Transport trait (port) - the platform's message primitives
//!
//! The domain layer defines what it needs; the gateway provides the
//! implementation for a concrete platform.

use async_trait::async_trait;

use crate::entities::{Envelope, MessageRef, OutgoingMessage};
use crate::error::DomainError;
use crate::value_objects::ChatId;

/// Result type for transport operations
pub type TransportResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a message to a chat, optionally as a reply
    async fn send(
        &self,
        chat_id: ChatId,
        message: &OutgoingMessage,
        reply_to: Option<MessageRef>,
    ) -> TransportResult<Envelope>;

    /// Replace the text and buttons of an existing message
    async fn edit(&self, target: MessageRef, message: &OutgoingMessage) -> TransportResult<Envelope>;

    /// Delete a message
    async fn delete(&self, target: MessageRef) -> TransportResult<()>;

    /// Forward a message into another chat
    async fn forward(&self, to: ChatId, source: MessageRef) -> TransportResult<Envelope>;
}
