//! # reaction-gateway
//!
//! Connects the reaction services to Telegram: a Bot API client that
//! implements the transport, a long poller that feeds updates to the router,
//! and the Unicode emoji scanner.

pub mod poller;
pub mod scanner;
pub mod server;
pub mod telegram;

pub use poller::{LongPoller, LongPollerConfig, UpdateSource};
pub use scanner::UnicodeEmojiScanner;
pub use server::{create_gateway_state, run, GatewayState};
pub use telegram::{TelegramClient, TelegramError, TelegramResult};
