//! Message envelope - the platform's view of a chat message

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{ChatId, MessageId, UserId};

/// Address of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

impl MessageRef {
    pub const fn new(chat_id: ChatId, message_id: MessageId) -> Self {
        Self {
            chat_id,
            message_id,
        }
    }
}

impl std::fmt::Display for MessageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.chat_id, self.message_id)
    }
}

/// Author of a message or button press
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sender {
    pub id: UserId,
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

impl Sender {
    /// Create a new Sender
    pub fn new(id: UserId, first_name: impl Into<String>) -> Self {
        Self {
            id,
            is_bot: false,
            first_name: first_name.into(),
            username: None,
        }
    }

    /// Set the username
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Name shown in notifications: `@username` when set, first name otherwise
    pub fn display_name(&self) -> String {
        match &self.username {
            Some(username) if !username.is_empty() => format!("@{username}"),
            _ => self.first_name.clone(),
        }
    }
}

/// Kind of a rich-text entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    /// Clickable text with a hidden destination URL
    TextLink,
    /// Any other formatting (bold, mention, ...)
    Other(String),
}

/// Rich-text span inside a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEntity {
    pub kind: EntityKind,
    pub offset: usize,
    pub length: usize,
    /// Destination for `TextLink` entities
    pub url: Option<String>,
}

impl TextEntity {
    /// Create a text link entity
    pub fn text_link(offset: usize, length: usize, url: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::TextLink,
            offset,
            length,
            url: Some(url.into()),
        }
    }

    #[inline]
    pub fn is_text_link(&self) -> bool {
        self.kind == EntityKind::TextLink
    }
}

/// Inline button attached below a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    /// Opaque payload delivered back on press
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// A message as seen on the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub sender: Option<Sender>,
    pub reply_to: Option<Box<Envelope>>,
    pub text: String,
    pub entities: Vec<TextEntity>,
    pub buttons: Vec<Vec<Button>>,
    pub date: Option<DateTime<Utc>>,
}

impl Envelope {
    /// Create a plain text message
    pub fn new(chat_id: ChatId, id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            chat_id,
            sender: None,
            reply_to: None,
            text: text.into(),
            entities: Vec::new(),
            buttons: Vec::new(),
            date: None,
        }
    }

    /// Set the sender
    #[must_use]
    pub fn with_sender(mut self, sender: Sender) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Set the replied-to message
    #[must_use]
    pub fn replying_to(mut self, message: Envelope) -> Self {
        self.reply_to = Some(Box::new(message));
        self
    }

    /// Address of this message
    pub fn message_ref(&self) -> MessageRef {
        MessageRef::new(self.chat_id, self.id)
    }

    /// ID of the author, if known
    pub fn sender_id(&self) -> Option<UserId> {
        self.sender.as_ref().map(|s| s.id)
    }

    /// Check whether `user` wrote this message
    pub fn is_from(&self, user: UserId) -> bool {
        self.sender_id() == Some(user)
    }

    /// Destinations of all text links, in order
    pub fn link_urls(&self) -> impl Iterator<Item = &str> {
        self.entities
            .iter()
            .filter(|e| e.is_text_link())
            .filter_map(|e| e.url.as_deref())
    }

    /// All buttons, row by row
    pub fn all_buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter().flatten()
    }
}

/// Text markup mode of an outgoing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TextFormat {
    #[default]
    Plain,
    Html,
}

/// Content to send or edit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OutgoingMessage {
    pub text: String,
    pub format: TextFormat,
    pub buttons: Vec<Vec<Button>>,
    /// Deliver without a notification sound
    pub silent: bool,
}

impl OutgoingMessage {
    /// Plain text message
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// HTML message with buttons
    pub fn html(text: impl Into<String>, buttons: Vec<Vec<Button>>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Html,
            buttons,
            silent: false,
        }
    }

    /// Mark as silent
    #[must_use]
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }
}
