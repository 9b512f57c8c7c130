//! Emoji scanning

mod unicode;

pub use unicode::UnicodeEmojiScanner;
