//! Reaction services
//!
//! The router classifies each inbound event; the reaction service creates or
//! edits reaction posts; the notification service tells the target's author.

pub mod context;
pub mod error;
pub mod notification;
pub mod reaction;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use notification::NotificationService;
pub use reaction::{PostUpdate, ReactionService};
pub use router::{EventRouter, IgnoreReason, Route, RouteOutcome};
