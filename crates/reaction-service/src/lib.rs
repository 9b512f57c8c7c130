//! # reaction-service
//!
//! Application layer: classifies inbound updates and drives the codec, the
//! toggle engine, the identity cache and the transport.

pub mod services;

pub use services::{
    EventRouter, IgnoreReason, NotificationService, PostUpdate, ReactionService, Route,
    RouteOutcome, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
