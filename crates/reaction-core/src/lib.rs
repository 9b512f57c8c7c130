//! # reaction-core
//!
//! Domain layer containing reaction entities, the toggle and layout engines,
//! inbound event types, and the transport/scanner traits.
//! This crate has zero dependencies on infrastructure (HTTP client, codec, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Button, EntityKind, Envelope, MessageRef, OutgoingMessage, PerUserHistory, ReactionEntry,
    ReactionSet, Sender, Target, TextEntity, TextFormat, ToggleOutcome,
};
pub use error::DomainError;
pub use events::{ButtonPress, InboundEvent};
pub use traits::{EmojiScanner, ScanResult, Transport, TransportResult};
pub use value_objects::{arrange, ButtonLayout, ChatId, IdParseError, MessageId, UserId};
