//! # reaction-codec
//!
//! Stateless codec for reaction posts. A platform message exposes only a few
//! writable fields, so all reaction state is packed into them:
//!
//! - **Buttons**: one per emoji, with payload `<fingerprint>|{"E":<emoji>,"C":<count>}`.
//! - **Hyperlink**: an invisible anchor whose destination query carries the
//!   target (`t`, JSON with hexadecimal ids) and the per-user history
//!   (`p`, JSON compressed with gzip, then base64url).
//!
//! ## Example
//!
//! ```ignore
//! use reaction_codec::PostCodec;
//!
//! let codec = PostCodec::new(layout, 4096);
//! let mut decoded = codec.decode(&reaction_post);
//! decoded.set.add_or_remove(user_id, ["👍"]);
//! let post = codec.encode(&decoded.set)?;
//! transport.edit(reaction_post.message_ref(), &post.to_message()).await?;
//! ```

mod button;
mod error;
mod link;
mod post;

pub use button::{decode_button, encode_button, fingerprint, FINGERPRINT_BYTES};
pub use error::{CodecError, CodecResult};
pub use link::{
    decode_link, decode_link_partial, encode_link, LinkPayload, LINK_BASE, LINK_HISTORY_KEY,
    LINK_TARGET_KEY,
};
pub use post::{DecodedPost, EncodedPost, PostCodec, DEFAULT_MAX_MESSAGE_LENGTH, ELLIPSIS};
