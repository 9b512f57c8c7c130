//! Reaction target - identity of the message being reacted to

use serde::Serialize;

use super::message::MessageRef;
use crate::value_objects::{ChatId, MessageId, UserId};

/// Identity of the reacted-to message.
///
/// A target decoded from a post that carries no (or an unreadable) link has
/// all identity fields zeroed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Target {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub author_id: UserId,
    /// Quoted text of the original message, possibly truncated
    pub text: String,
}

impl Target {
    /// Create a new Target
    pub fn new(chat_id: ChatId, message_id: MessageId, author_id: UserId, text: String) -> Self {
        Self {
            chat_id,
            message_id,
            author_id,
            text,
        }
    }

    /// Check whether the identity fields are known
    #[inline]
    pub fn is_anchored(&self) -> bool {
        !self.message_id.is_zero()
    }

    /// Reference to the reacted-to message
    pub fn message_ref(&self) -> MessageRef {
        MessageRef::new(self.chat_id, self.message_id)
    }

    /// Check whether the author can be notified
    #[inline]
    pub fn has_author(&self) -> bool {
        !self.author_id.is_zero()
    }
}
