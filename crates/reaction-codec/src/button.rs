//! Button payloads
//!
//! ```text
//! 3f2a9c0b1d4e5f60|{"E":"👍","C":2}
//! ^^^^^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^
//! fingerprint      entry
//! ```

use reaction_core::{Button, MessageId, ReactionEntry};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{CodecError, CodecResult};

/// Number of hash bytes kept in a fingerprint
pub const FINGERPRINT_BYTES: usize = 8;

const SEPARATOR: char = '|';

#[derive(Debug, Serialize, Deserialize)]
struct EntryWire {
    #[serde(rename = "E")]
    emoji: String,
    #[serde(rename = "C")]
    count: u32,
}

/// Stable identifier of the button for `emoji` under the post for `target`.
///
/// Hex of the first [`FINGERPRINT_BYTES`] bytes of
/// `sha256(hex(target) ++ emoji)`.
pub fn fingerprint(target: MessageId, emoji: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(target.to_hex().as_bytes());
    hasher.update(emoji.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

/// Build the button for one entry
pub fn encode_button(target: MessageId, entry: &ReactionEntry) -> CodecResult<Button> {
    let wire = EntryWire {
        emoji: entry.emoji.clone(),
        count: entry.count,
    };
    let json = serde_json::to_string(&wire)?;
    let data = format!("{}{SEPARATOR}{json}", fingerprint(target, &entry.emoji));
    Ok(Button::new(entry.label(), data))
}

/// Parse a button payload back into an entry.
///
/// Everything up to the first separator is the fingerprint and is not
/// needed to rebuild the entry. Payloads without a separator are read whole.
pub fn decode_button(data: &str) -> CodecResult<ReactionEntry> {
    let json = data
        .split_once(SEPARATOR)
        .map_or(data, |(_, json)| json);

    let wire: EntryWire =
        serde_json::from_str(json).map_err(|e| CodecError::button(data, e))?;

    if wire.emoji.is_empty() {
        return Err(CodecError::button(data, "empty emoji"));
    }
    if wire.count == 0 {
        return Err(CodecError::button(data, "zero count"));
    }

    Ok(ReactionEntry::new(wire.emoji, wire.count))
}
