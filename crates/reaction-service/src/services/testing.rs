//! Test doubles for the service layer

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use reaction_core::{
    ChatId, DomainError, EmojiScanner, Envelope, MessageId, MessageRef, OutgoingMessage,
    ScanResult, Sender, TextEntity, TextFormat, Transport, TransportResult, UserId,
};

pub(crate) const BOT_ID: UserId = UserId::new(999);

/// Treats every character from U+2600 upwards as one emoji
pub(crate) struct SimpleScanner;

impl EmojiScanner for SimpleScanner {
    fn scan(&self, text: &str) -> ScanResult {
        let mut result = ScanResult::default();
        for c in text.chars() {
            if u32::from(c) >= 0x2600 {
                result.emoji.push(c.to_string());
            } else if !c.is_whitespace() && !c.is_ascii_punctuation() {
                result.residual.push(c);
            }
        }
        result
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Send {
        chat_id: ChatId,
        text: String,
        reply_to: Option<MessageRef>,
    },
    Edit(MessageRef),
    Delete(MessageRef),
    Forward {
        to: ChatId,
        source: MessageRef,
    },
}

#[derive(Default)]
struct State {
    next_id: i64,
    messages: HashMap<MessageRef, Envelope>,
    calls: Vec<Call>,
    fail_on: Option<&'static str>,
}

/// In-memory transport that records every call
#[derive(Default)]
pub(crate) struct RecordingTransport {
    state: Mutex<State>,
}

impl RecordingTransport {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub(crate) fn message(&self, at: MessageRef) -> Option<Envelope> {
        self.state.lock().messages.get(&at).cloned()
    }

    /// Make every call of the named kind fail
    pub(crate) fn fail_on(&self, op: &'static str) {
        self.state.lock().fail_on = Some(op);
    }

    fn check(state: &State, op: &'static str) -> TransportResult<()> {
        if state.fail_on == Some(op) {
            Err(DomainError::platform(format!("{op} rejected")))
        } else {
            Ok(())
        }
    }
}

/// What the platform shows for a sent message: HTML anchors become entities
pub(crate) fn render(chat_id: ChatId, id: MessageId, message: &OutgoingMessage) -> Envelope {
    let mut envelope = Envelope::new(chat_id, id, message.text.clone())
        .with_sender(Sender::new(BOT_ID, "ReactionBot"));
    envelope.buttons = message.buttons.clone();

    if message.format == TextFormat::Html {
        if let Some(rest) = message.text.strip_prefix("<a href=\"") {
            if let Some((href, inner)) = rest.split_once("\">") {
                let url = href
                    .replace("&quot;", "\"")
                    .replace("&lt;", "<")
                    .replace("&gt;", ">")
                    .replace("&amp;", "&");
                let text = inner.trim_end_matches("</a>").to_string();
                envelope.entities.push(TextEntity::text_link(0, text.chars().count(), url));
                envelope.text = text;
            }
        }
    }
    envelope
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(
        &self,
        chat_id: ChatId,
        message: &OutgoingMessage,
        reply_to: Option<MessageRef>,
    ) -> TransportResult<Envelope> {
        let mut state = self.state.lock();
        Self::check(&state, "send")?;
        state.next_id += 1;
        let mut envelope = render(chat_id, MessageId::new(1000 + state.next_id), message);
        if let Some(parent) = reply_to.and_then(|r| state.messages.get(&r).cloned()) {
            envelope = envelope.replying_to(parent);
        }
        state.calls.push(Call::Send {
            chat_id,
            text: message.text.clone(),
            reply_to,
        });
        state.messages.insert(envelope.message_ref(), envelope.clone());
        Ok(envelope)
    }

    async fn edit(&self, target: MessageRef, message: &OutgoingMessage) -> TransportResult<Envelope> {
        let mut state = self.state.lock();
        Self::check(&state, "edit")?;
        let envelope = render(target.chat_id, target.message_id, message);
        state.calls.push(Call::Edit(target));
        state.messages.insert(target, envelope.clone());
        Ok(envelope)
    }

    async fn delete(&self, target: MessageRef) -> TransportResult<()> {
        let mut state = self.state.lock();
        Self::check(&state, "delete")?;
        state.calls.push(Call::Delete(target));
        state.messages.remove(&target);
        Ok(())
    }

    async fn forward(&self, to: ChatId, source: MessageRef) -> TransportResult<Envelope> {
        let mut state = self.state.lock();
        Self::check(&state, "forward")?;
        state.next_id += 1;
        let text = state
            .messages
            .get(&source)
            .map(|m| m.text.clone())
            .unwrap_or_default();
        let envelope = Envelope::new(to, MessageId::new(1000 + state.next_id), text);
        state.calls.push(Call::Forward { to, source });
        state.messages.insert(envelope.message_ref(), envelope.clone());
        Ok(envelope)
    }
}
