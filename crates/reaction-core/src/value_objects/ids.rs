//! Platform identifiers - chat, message, and user IDs
//!
//! All three are signed 64-bit integers on the wire. Group chats use negative
//! IDs, so the hexadecimal form carries an explicit sign instead of a two's
//! complement bit pattern:
//!
//! - `255`  -> `"ff"`
//! - `-255` -> `"-ff"`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error when parsing an identifier from its hexadecimal form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid hexadecimal id")]
    InvalidFormat,
}

macro_rules! platform_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create from a raw i64 value
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Check if the ID is zero (unknown or uninitialized)
            #[inline]
            pub const fn is_zero(&self) -> bool {
                self.0 == 0
            }

            /// Lowercase hexadecimal form used in encoded payloads
            pub fn to_hex(&self) -> String {
                if self.0 < 0 {
                    format!("-{:x}", self.0.unsigned_abs())
                } else {
                    format!("{:x}", self.0)
                }
            }

            /// Parse the hexadecimal form produced by [`Self::to_hex`]
            pub fn from_hex(s: &str) -> Result<Self, IdParseError> {
                i64::from_str_radix(s, 16)
                    .map(Self)
                    .map_err(|_| IdParseError::InvalidFormat)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

platform_id!(
    /// Chat (conversation) identifier
    ChatId
);

platform_id!(
    /// Message identifier, unique within a chat
    MessageId
);

platform_id!(
    /// User identifier
    UserId
);

impl UserId {
    /// The private chat with a user shares the user's ID
    #[must_use]
    pub const fn private_chat(self) -> ChatId {
        ChatId::new(self.0)
    }
}
