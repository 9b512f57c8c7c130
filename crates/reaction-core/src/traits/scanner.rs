//! Emoji scanner trait (port)

/// Emoji found in a text and whatever is left once they are removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Emoji tokens in order of appearance
    pub emoji: Vec<String>,
    /// Non-emoji text with whitespace and punctuation removed
    pub residual: String,
}

impl ScanResult {
    /// Check whether the text consisted of emoji only
    pub fn is_emoji_only(&self) -> bool {
        !self.emoji.is_empty() && self.residual.is_empty()
    }
}

pub trait EmojiScanner: Send + Sync {
    /// Split text into emoji tokens and residual text
    fn scan(&self, text: &str) -> ScanResult;
}
