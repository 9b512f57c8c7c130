//! Hyperlink payload - target and per-user history
//!
//! ```text
//! http://example.com/?t=<target JSON>&p=<base64url(gzip(history JSON))>
//! ```
//!
//! Target JSON: `{"C":"<chat hex>","I":"<message hex>","H":"<author hex>","T":"<text>"}`.
//! History JSON: `{"<user hex>":{"<emoji>":<count>}}`.
//! Both query values are percent-encoded.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use reaction_core::{ChatId, IdParseError, MessageId, PerUserHistory, Target, UserId};
use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

use crate::error::{CodecError, CodecResult};

/// Destination the payload is attached to
pub const LINK_BASE: &str = "http://example.com/";
/// Query key of the target payload
pub const LINK_TARGET_KEY: &str = "t";
/// Query key of the history payload
pub const LINK_HISTORY_KEY: &str = "p";
/// Query key used for the target by older posts
const LEGACY_TARGET_KEY: &str = "data";

#[derive(Debug, Default, Serialize, Deserialize)]
struct TargetWire {
    #[serde(rename = "C", default, skip_serializing_if = "String::is_empty")]
    chat_id: String,
    #[serde(rename = "I", default, skip_serializing_if = "String::is_empty")]
    message_id: String,
    #[serde(rename = "H", default, skip_serializing_if = "String::is_empty")]
    author_id: String,
    #[serde(rename = "T", default, skip_serializing_if = "String::is_empty")]
    text: String,
}

type HistoryWire = BTreeMap<String, BTreeMap<String, u32>>;

/// Decoded content of a reaction post link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPayload {
    pub target: Target,
    pub history: PerUserHistory,
}

/// Pre-compressed history blob, reused while only the target changes
pub(crate) fn compress_history(history: &PerUserHistory) -> CodecResult<String> {
    if history.is_empty() {
        return Ok(String::new());
    }

    let wire: HistoryWire = history
        .iter()
        .map(|(user, counts)| (user.to_hex(), counts.clone()))
        .collect();
    let json = serde_json::to_vec(&wire)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;

    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

fn decompress_history(url: &str, blob: &str) -> CodecResult<PerUserHistory> {
    let mut history = PerUserHistory::new();
    if blob.is_empty() {
        return Ok(history);
    }

    let compressed = URL_SAFE_NO_PAD
        .decode(blob)
        .map_err(|e| CodecError::link(url, format!("history encoding: {e}")))?;
    let mut json = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut json)
        .map_err(|e| CodecError::link(url, format!("history compression: {e}")))?;
    let wire: HistoryWire = serde_json::from_slice(&json)
        .map_err(|e| CodecError::link(url, format!("history JSON: {e}")))?;

    for (user_hex, counts) in wire {
        let user = UserId::from_hex(&user_hex)
            .map_err(|e| CodecError::link(url, format!("history user {user_hex:?}: {e}")))?;
        for (emoji, count) in counts {
            history.insert(user, emoji, count);
        }
    }
    Ok(history)
}

pub(crate) fn target_json(target: &Target) -> CodecResult<String> {
    let wire = TargetWire {
        chat_id: target.chat_id.to_hex(),
        message_id: target.message_id.to_hex(),
        author_id: target.author_id.to_hex(),
        text: target.text.clone(),
    };
    Ok(serde_json::to_string(&wire)?)
}

/// Assemble the link from an encoded target and a compressed history blob
pub(crate) fn assemble_link(target_json: &str, history_blob: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(LINK_TARGET_KEY, target_json)
        .append_pair(LINK_HISTORY_KEY, history_blob)
        .finish();
    format!("{LINK_BASE}?{query}")
}

/// Encode a target and history as a link destination
pub fn encode_link(target: &Target, history: &PerUserHistory) -> CodecResult<String> {
    Ok(assemble_link(
        &target_json(target)?,
        &compress_history(history)?,
    ))
}

fn parse_hex<T: Default>(
    url: &str,
    field: &str,
    value: &str,
    parse: fn(&str) -> Result<T, IdParseError>,
) -> CodecResult<T> {
    if value.is_empty() {
        return Ok(T::default());
    }
    parse(value).map_err(|e| CodecError::link(url, format!("{field} {value:?}: {e}")))
}

/// Decode a link destination.
///
/// A link without a target key yields an unanchored target. When the target
/// parses but the history does not, the error is returned; callers wanting
/// the partial result use [`decode_link_partial`].
pub fn decode_link(url: &str) -> CodecResult<LinkPayload> {
    let (payload, error) = decode_link_partial(url);
    match error {
        Some(e) => Err(e),
        None => Ok(payload),
    }
}

/// Decode as much of a link as possible, reporting the first failure
pub fn decode_link_partial(url: &str) -> (LinkPayload, Option<CodecError>) {
    let mut payload = LinkPayload::default();

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => return (payload, Some(CodecError::link(url, e))),
    };

    let mut target_raw = None;
    let mut legacy_raw = None;
    let mut history_raw = None;
    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            LINK_TARGET_KEY => target_raw = Some(value.into_owned()),
            LEGACY_TARGET_KEY => legacy_raw = Some(value.into_owned()),
            LINK_HISTORY_KEY => history_raw = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(raw) = target_raw.or(legacy_raw) {
        match decode_target(url, &raw) {
            Ok(target) => payload.target = target,
            Err(e) => return (payload, Some(e)),
        }
    }

    if let Some(blob) = history_raw {
        match decompress_history(url, &blob) {
            Ok(history) => payload.history = history,
            Err(e) => return (payload, Some(e)),
        }
    }

    (payload, None)
}

fn decode_target(url: &str, raw: &str) -> CodecResult<Target> {
    let wire: TargetWire =
        serde_json::from_str(raw).map_err(|e| CodecError::link(url, format!("target JSON: {e}")))?;

    Ok(Target {
        chat_id: parse_hex(url, "chat", &wire.chat_id, ChatId::from_hex)?,
        message_id: parse_hex(url, "message", &wire.message_id, MessageId::from_hex)?,
        author_id: parse_hex(url, "author", &wire.author_id, UserId::from_hex)?,
        text: wire.text,
    })
}
