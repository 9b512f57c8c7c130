//! Value objects - immutable types that represent domain concepts

mod button_layout;
mod ids;

pub use button_layout::{arrange, ButtonLayout};
pub use ids::{ChatId, IdParseError, MessageId, UserId};
