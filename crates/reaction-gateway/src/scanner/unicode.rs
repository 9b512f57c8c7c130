//! Emoji scanner over extended grapheme clusters
//!
//! A cluster is one emoji token when it holds a pictographic code point or
//! a keycap mark, so ZWJ sequences, flags, skin tones and keycaps each stay
//! a single token.

use reaction_core::{EmojiScanner, ScanResult};
use unicode_segmentation::UnicodeSegmentation;

const KEYCAP: char = '\u{20E3}';

/// Code point ranges treated as pictographic
const PICTOGRAPHIC: &[(u32, u32)] = &[
    (0x00A9, 0x00A9),
    (0x00AE, 0x00AE),
    (0x203C, 0x203C),
    (0x2049, 0x2049),
    (0x2122, 0x2122),
    (0x2139, 0x2139),
    (0x2194, 0x21AA),
    (0x231A, 0x23FF),
    (0x24C2, 0x24C2),
    (0x25AA, 0x25FE),
    (0x2600, 0x27BF),
    (0x2934, 0x2935),
    (0x2B05, 0x2B55),
    (0x3030, 0x3030),
    (0x303D, 0x303D),
    (0x3297, 0x3299),
    (0x1F000, 0x1FAFF),
];

/// Emoji scanner backed by Unicode segmentation
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeEmojiScanner;

impl UnicodeEmojiScanner {
    pub fn new() -> Self {
        Self
    }

    fn is_pictographic(c: char) -> bool {
        let code = u32::from(c);
        PICTOGRAPHIC
            .iter()
            .any(|&(start, end)| (start..=end).contains(&code))
    }

    fn is_emoji(grapheme: &str) -> bool {
        grapheme
            .chars()
            .any(|c| c == KEYCAP || Self::is_pictographic(c))
    }

    /// Whitespace and punctuation do not count as residual text
    fn is_filler(grapheme: &str) -> bool {
        grapheme
            .chars()
            .all(|c| c.is_whitespace() || c.is_ascii_punctuation() || is_general_punctuation(c))
    }
}

fn is_general_punctuation(c: char) -> bool {
    matches!(u32::from(c), 0x2000..=0x206F | 0x3000..=0x303F)
        && !UnicodeEmojiScanner::is_pictographic(c)
}

impl EmojiScanner for UnicodeEmojiScanner {
    fn scan(&self, text: &str) -> ScanResult {
        let mut result = ScanResult::default();
        for grapheme in text.graphemes(true) {
            if Self::is_emoji(grapheme) {
                result.emoji.push(grapheme.to_string());
            } else if !Self::is_filler(grapheme) {
                result.residual.push_str(grapheme);
            }
        }
        result
    }
}
