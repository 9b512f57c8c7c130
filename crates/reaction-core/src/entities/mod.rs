//! Domain entities - core business objects

mod history;
mod message;
mod reaction;
mod target;

pub use history::PerUserHistory;
pub use message::{
    Button, EntityKind, Envelope, MessageRef, OutgoingMessage, Sender, TextEntity, TextFormat,
};
pub use reaction::{ReactionEntry, ReactionSet, ToggleOutcome};
pub use target::Target;
