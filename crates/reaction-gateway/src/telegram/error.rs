//! Bot API errors

use reaction_core::DomainError;

/// Bot API call errors
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bot API error {code:?}: {description}")]
    Api {
        code: Option<i32>,
        description: String,
    },

    #[error("Bot API returned no result for {0}")]
    MissingResult(&'static str),
}

impl TelegramError {
    /// Check if the request never got an answer
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

impl From<TelegramError> for DomainError {
    fn from(err: TelegramError) -> Self {
        DomainError::platform(err)
    }
}

/// Result type for Bot API calls
pub type TelegramResult<T> = Result<T, TelegramError>;
