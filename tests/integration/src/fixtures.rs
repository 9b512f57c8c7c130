//! Test fixtures and data generators

use std::sync::atomic::{AtomicI64, Ordering};

use reaction_core::{ChatId, Envelope, Sender, UserId};

use crate::helpers::BOT_ID;

/// Counter for unique test users
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// The group chat every scenario plays in
pub const GROUP: ChatId = ChatId::new(-1_001_234_567_890);

pub fn alice() -> Sender {
    Sender::new(UserId::new(1001), "Alice").with_username("alice")
}

pub fn bob() -> Sender {
    Sender::new(UserId::new(1002), "Bob")
}

pub fn carol() -> Sender {
    Sender::new(UserId::new(1003), "Carol").with_username("carol")
}

/// A user nobody else has seen, with a large id so that histories of many
/// users compress poorly
pub fn unique_user() -> Sender {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    Sender::new(UserId::new(6_000_000_000 + n * 7_919_117), format!("User{n}"))
}

/// Bot API update for a text reply, as the platform delivers it
pub fn reply_update_json(
    update_id: i64,
    message_id: i64,
    from: &Sender,
    text: &str,
    replied: serde_json::Value,
) -> serde_json::Value {
    serde_json::json!({
        "update_id": update_id,
        "message": {
            "message_id": message_id,
            "from": {
                "id": from.id.into_inner(),
                "is_bot": false,
                "first_name": from.first_name,
                "username": from.username,
            },
            "chat": {"id": GROUP.into_inner(), "type": "supergroup"},
            "date": 1_700_000_000,
            "text": text,
            "reply_to_message": replied,
        }
    })
}

/// Bot API message JSON for a plain user message
pub fn user_message_json(message_id: i64, from: &Sender, text: &str) -> serde_json::Value {
    serde_json::json!({
        "message_id": message_id,
        "from": {
            "id": from.id.into_inner(),
            "is_bot": false,
            "first_name": from.first_name,
        },
        "chat": {"id": GROUP.into_inner(), "type": "supergroup"},
        "date": 1_699_999_000,
        "text": text,
    })
}

/// Bot API update for a press on button `index` of a reaction post
pub fn callback_update_json(
    update_id: i64,
    from: &Sender,
    post: &Envelope,
    index: usize,
) -> serde_json::Value {
    let entities: Vec<_> = post
        .entities
        .iter()
        .filter(|e| e.is_text_link())
        .map(|e| {
            serde_json::json!({
                "type": "text_link",
                "offset": e.offset,
                "length": e.length,
                "url": e.url,
            })
        })
        .collect();
    let keyboard: Vec<Vec<_>> = post
        .buttons
        .iter()
        .map(|row| {
            row.iter()
                .map(|b| serde_json::json!({"text": b.label, "callback_data": b.data}))
                .collect()
        })
        .collect();
    let data = post.all_buttons().nth(index).map(|b| b.data.clone());

    serde_json::json!({
        "update_id": update_id,
        "callback_query": {
            "id": format!("cb-{update_id}"),
            "from": {
                "id": from.id.into_inner(),
                "is_bot": false,
                "first_name": from.first_name,
            },
            "message": {
                "message_id": post.id.into_inner(),
                "from": {"id": BOT_ID.into_inner(), "is_bot": true, "first_name": "ReactionBot"},
                "chat": {"id": post.chat_id.into_inner(), "type": "supergroup"},
                "date": 1_700_000_100,
                "text": post.text,
                "entities": entities,
                "reply_markup": {"inline_keyboard": keyboard},
            },
            "data": data,
        }
    })
}
