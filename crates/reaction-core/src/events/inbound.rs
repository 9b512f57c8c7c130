//! Inbound events - updates the router reacts to

use serde::Serialize;

use crate::entities::{Envelope, Sender};

/// A press on one of the reaction buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonPress {
    /// Platform handle used to acknowledge the press
    pub id: String,
    pub sender: Sender,
    /// The reaction post carrying the button
    pub message: Envelope,
    /// Payload of the pressed button
    pub data: String,
}

/// Update delivered by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "t", content = "d")]
pub enum InboundEvent {
    /// A new message of any content kind
    Message(Envelope),
    /// A button press on a message
    ButtonPress(ButtonPress),
}

impl InboundEvent {
    /// Get the event type name for logs
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Message(_) => "MESSAGE",
            Self::ButtonPress(_) => "BUTTON_PRESS",
        }
    }
}
