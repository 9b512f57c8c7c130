//! Codec error types

use reaction_core::DomainError;

/// Error for a single element of a reaction post
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("button {data:?}: {reason}")]
    Button { data: String, reason: String },

    #[error("link {url:?}: {reason}")]
    Link { url: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Compression error: {0}")]
    Compression(#[from] std::io::Error),
}

impl CodecError {
    pub(crate) fn button(data: &str, reason: impl std::fmt::Display) -> Self {
        Self::Button {
            data: data.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn link(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::Link {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<CodecError> for DomainError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Button { .. } => DomainError::MalformedButton(err.to_string()),
            CodecError::Link { .. } => DomainError::MalformedLink(err.to_string()),
            CodecError::Json(_) | CodecError::Compression(_) => {
                DomainError::InternalError(err.to_string())
            }
        }
    }
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
