//! Inbound events delivered by the platform

mod inbound;

pub use inbound::{ButtonPress, InboundEvent};
