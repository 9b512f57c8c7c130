//! Reaction post codec - whole-message encode/decode with the size budget

use reaction_core::{
    Button, ButtonLayout, DomainError, Envelope, OutgoingMessage, ReactionSet, Target,
};
use tracing::{debug, warn};

use crate::button::{decode_button, encode_button};
use crate::error::{CodecError, CodecResult};
use crate::link::{assemble_link, compress_history, decode_link_partial, target_json};

/// Platform message size ceiling, in characters of text plus markup
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 4096;

/// Appended to a truncated quote
pub const ELLIPSIS: char = '…';

/// Visible text of the anchor: two soft hyphens, rendered as nothing
const ANCHOR_TEXT: &str = "\u{ad}\u{ad}";

/// Encoded form of a reaction set, ready to send or edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPost {
    /// HTML text carrying the hyperlink
    pub text: String,
    /// Hyperlink destination embedded in `text`
    pub link: String,
    pub buttons: Vec<Vec<Button>>,
    /// Users whose history was dropped to fit the budget
    pub evicted_users: usize,
    /// Whether the quoted target text was shortened
    pub truncated_text: bool,
    limit: usize,
}

impl EncodedPost {
    /// Size counted against the budget: text plus every button payload
    pub fn size(&self) -> usize {
        measure(&self.text, &self.buttons)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn fits(&self) -> bool {
        self.size() <= self.limit
    }

    /// Report an oversized post. Such a post is still sendable; the platform
    /// is expected to reject it.
    pub fn check_budget(&self) -> Result<(), DomainError> {
        if self.fits() {
            Ok(())
        } else {
            Err(DomainError::BudgetExceeded {
                size: self.size(),
                limit: self.limit,
            })
        }
    }

    /// Outgoing message for send/edit
    pub fn to_message(&self) -> OutgoingMessage {
        OutgoingMessage::html(self.text.clone(), self.buttons.clone())
    }
}

/// Result of decoding a reaction post. Malformed elements are skipped and
/// reported in `errors`.
#[derive(Debug)]
pub struct DecodedPost {
    pub set: ReactionSet,
    pub errors: Vec<CodecError>,
}

impl DecodedPost {
    /// Check whether some element could not be read
    pub fn is_degraded(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Encodes and decodes reaction posts
#[derive(Debug, Clone, Copy)]
pub struct PostCodec {
    layout: ButtonLayout,
    max_length: usize,
}

impl Default for PostCodec {
    fn default() -> Self {
        Self::new(ButtonLayout::default(), DEFAULT_MAX_MESSAGE_LENGTH)
    }
}

impl PostCodec {
    /// Create a new codec
    pub fn new(layout: ButtonLayout, max_length: usize) -> Self {
        Self { layout, max_length }
    }

    pub fn layout(&self) -> ButtonLayout {
        self.layout
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Encode a set.
    ///
    /// While the result exceeds the budget, whole users are dropped from the
    /// history, then the quoted target text is shortened one character at a
    /// time, keeping the longest prefix that fits. Entries are never dropped,
    /// so the result may still not fit.
    pub fn encode(&self, set: &ReactionSet) -> CodecResult<EncodedPost> {
        let anchor = set.target.message_id;
        let buttons = set
            .entries()
            .iter()
            .map(|entry| encode_button(anchor, entry))
            .collect::<CodecResult<Vec<_>>>()?;
        let rows = self.layout.arrange(buttons);

        let mut history = set.history.clone();
        let target = target_json(&set.target)?;
        let mut blob = compress_history(&history)?;
        let mut link = assemble_link(&target, &blob);
        let mut text = display_text(&link);

        let mut evicted_users = 0;
        while measure(&text, &rows) > self.max_length && history.evict_one().is_some() {
            evicted_users += 1;
            blob = compress_history(&history)?;
            link = assemble_link(&target, &blob);
            text = display_text(&link);
        }

        let quote: Vec<char> = set.target.text.chars().collect();
        let mut truncated_text = false;
        if measure(&text, &rows) > self.max_length && !quote.is_empty() {
            truncated_text = true;
            let shortened = |keep: usize| -> CodecResult<(String, String)> {
                let mut quoted: String = quote[..keep].iter().collect();
                quoted.push(ELLIPSIS);
                let target = target_json(&Target {
                    text: quoted,
                    ..set.target.clone()
                })?;
                let link = assemble_link(&target, &blob);
                let text = display_text(&link);
                Ok((link, text))
            };

            // Longest prefix that fits; the empty prefix when none does
            let (mut lo, mut hi) = (0, quote.len() - 1);
            while lo < hi {
                let mid = lo + (hi - lo + 1) / 2;
                let (_, candidate) = shortened(mid)?;
                if measure(&candidate, &rows) <= self.max_length {
                    lo = mid;
                } else {
                    hi = mid - 1;
                }
            }
            (link, text) = shortened(lo)?;
        }

        if evicted_users > 0 || truncated_text {
            debug!(
                target_message = %anchor,
                evicted_users,
                truncated_text,
                "Reaction post shrunk to fit budget"
            );
        }

        Ok(EncodedPost {
            text,
            link,
            buttons: rows,
            evicted_users,
            truncated_text,
            limit: self.max_length,
        })
    }

    /// Decode a reaction post. Never fails: unreadable buttons are skipped and
    /// an unreadable link yields an unanchored target with empty history.
    pub fn decode(&self, message: &Envelope) -> DecodedPost {
        let mut errors = Vec::new();

        let mut entries = Vec::new();
        for button in message.all_buttons() {
            match decode_button(&button.data) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!(
                        chat_id = %message.chat_id,
                        message_id = %message.id,
                        error = %e,
                        "Skipping malformed reaction button"
                    );
                    errors.push(e);
                }
            }
        }

        let mut target = Target::default();
        let mut history = reaction_core::PerUserHistory::new();
        // The last readable link wins. A broken link only replaces what came
        // before when nothing anchored was read yet.
        for url in message.link_urls() {
            let (payload, error) = decode_link_partial(url);
            match error {
                None => {
                    target = payload.target;
                    history = payload.history;
                }
                Some(e) => {
                    warn!(
                        chat_id = %message.chat_id,
                        message_id = %message.id,
                        error = %e,
                        "Malformed reaction link"
                    );
                    errors.push(e);
                    if payload.target.is_anchored() && !target.is_anchored() {
                        target = payload.target;
                        history = payload.history;
                    }
                }
            }
        }

        DecodedPost {
            set: ReactionSet::from_parts(entries, target, history),
            errors,
        }
    }
}

/// HTML text of a post: an invisible anchor pointing at `link`
fn display_text(link: &str) -> String {
    format!(r#"<a href="{}">{ANCHOR_TEXT}</a>"#, escape_attribute(link))
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn measure(text: &str, rows: &[Vec<Button>]) -> usize {
    text.chars().count()
        + rows
            .iter()
            .flatten()
            .map(|button| button.data.chars().count())
            .sum::<usize>()
}
