//! Telegram Bot API client and wire types

mod client;
mod error;
pub mod types;

pub use client::TelegramClient;
pub use error::{TelegramError, TelegramResult};
