//! Bot API wire types
//!
//! Only the fields the bot reads or writes are modelled. Everything else in
//! the JSON is ignored.

use chrono::DateTime;
use reaction_core::{
    Button, ButtonPress, ChatId, EntityKind, Envelope, InboundEvent, MessageId, OutgoingMessage,
    Sender, TextEntity, TextFormat, UserId,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Responses
// =============================================================================

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: usize,
    pub length: usize,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub date: i64,
    pub reply_to_message: Option<Box<Message>>,
    pub text: Option<String>,
    pub caption: Option<String>,
    #[serde(default)]
    pub entities: Vec<MessageEntity>,
    #[serde(default)]
    pub caption_entities: Vec<MessageEntity>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub channel_post: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Serialize)]
pub struct GetUpdatesRequest {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_notification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl<'a> SendMessageRequest<'a> {
    pub fn new(chat_id: ChatId, message: &'a OutgoingMessage, reply_to: Option<MessageId>) -> Self {
        Self {
            chat_id: chat_id.into_inner(),
            text: &message.text,
            parse_mode: parse_mode(message.format),
            disable_notification: message.silent,
            reply_to_message_id: reply_to.map(MessageId::into_inner),
            reply_markup: keyboard(&message.buttons),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditMessageTextRequest<'a> {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    /// Always sent so that an empty keyboard clears the buttons
    pub reply_markup: InlineKeyboardMarkup,
}

impl<'a> EditMessageTextRequest<'a> {
    pub fn new(chat_id: ChatId, message_id: MessageId, message: &'a OutgoingMessage) -> Self {
        Self {
            chat_id: chat_id.into_inner(),
            message_id: message_id.into_inner(),
            text: &message.text,
            parse_mode: parse_mode(message.format),
            reply_markup: keyboard(&message.buttons).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteMessageRequest {
    pub chat_id: i64,
    pub message_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ForwardMessageRequest {
    pub chat_id: i64,
    pub from_chat_id: i64,
    pub message_id: i64,
    pub disable_notification: bool,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQueryRequest<'a> {
    pub callback_query_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EmptyRequest {}

fn parse_mode(format: TextFormat) -> Option<&'static str> {
    match format {
        TextFormat::Plain => None,
        TextFormat::Html => Some("HTML"),
    }
}

fn keyboard(rows: &[Vec<Button>]) -> Option<InlineKeyboardMarkup> {
    if rows.is_empty() {
        return None;
    }
    Some(InlineKeyboardMarkup {
        inline_keyboard: rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| InlineKeyboardButton {
                        text: button.label.clone(),
                        callback_data: Some(button.data.clone()),
                    })
                    .collect()
            })
            .collect(),
    })
}

// =============================================================================
// Mapping into core types
// =============================================================================

impl From<User> for Sender {
    fn from(user: User) -> Self {
        Self {
            id: UserId::new(user.id),
            is_bot: user.is_bot,
            first_name: user.first_name,
            username: user.username,
        }
    }
}

impl From<MessageEntity> for TextEntity {
    fn from(entity: MessageEntity) -> Self {
        Self {
            kind: match entity.kind.as_str() {
                "text_link" => EntityKind::TextLink,
                _ => EntityKind::Other(entity.kind),
            },
            offset: entity.offset,
            length: entity.length,
            url: entity.url,
        }
    }
}

impl From<Message> for Envelope {
    fn from(message: Message) -> Self {
        // Media messages carry their text as a caption
        let (text, entities) = match message.text {
            Some(text) => (text, message.entities),
            None => (
                message.caption.unwrap_or_default(),
                message.caption_entities,
            ),
        };

        Self {
            id: MessageId::new(message.message_id),
            chat_id: ChatId::new(message.chat.id),
            sender: message.from.map(Sender::from),
            reply_to: message.reply_to_message.map(|m| Box::new(Self::from(*m))),
            text,
            entities: entities.into_iter().map(TextEntity::from).collect(),
            buttons: message
                .reply_markup
                .map(|markup| {
                    markup
                        .inline_keyboard
                        .into_iter()
                        .map(|row| {
                            row.into_iter()
                                .map(|b| Button::new(b.text, b.callback_data.unwrap_or_default()))
                                .collect()
                        })
                        .collect()
                })
                .unwrap_or_default(),
            date: DateTime::from_timestamp(message.date, 0),
        }
    }
}

impl Update {
    /// Callback query id to answer once the update is handled
    pub fn callback_id(&self) -> Option<&str> {
        self.callback_query.as_ref().map(|q| q.id.as_str())
    }

    /// Convert into a router event. Updates of other kinds and callbacks
    /// without their message yield `None`.
    pub fn into_event(self) -> Option<InboundEvent> {
        if let Some(query) = self.callback_query {
            let message = query.message?;
            return Some(InboundEvent::ButtonPress(ButtonPress {
                id: query.id,
                sender: query.from.into(),
                message: message.into(),
                data: query.data.unwrap_or_default(),
            }));
        }

        self.message
            .or(self.channel_post)
            .map(|m| InboundEvent::Message(m.into()))
    }
}
