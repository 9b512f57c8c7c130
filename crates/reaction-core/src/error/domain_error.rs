//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    // =========================================================================
    // Decode Errors (tolerated, the offending element is skipped)
    // =========================================================================
    #[error("Malformed button payload: {0}")]
    MalformedButton(String),

    #[error("Malformed link payload: {0}")]
    MalformedLink(String),

    // =========================================================================
    // Encode Errors
    // =========================================================================
    #[error("Encoded post is {size} characters, budget is {limit}")]
    BudgetExceeded { size: usize, limit: usize },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid button layout: {0}")]
    InvalidLayout(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Platform call failed: {0}")]
    PlatformCall(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedButton(_) => "MALFORMED_BUTTON",
            Self::MalformedLink(_) => "MALFORMED_LINK",
            Self::BudgetExceeded { .. } => "BUDGET_EXCEEDED",
            Self::InvalidLayout(_) => "INVALID_LAYOUT",
            Self::PlatformCall(_) => "PLATFORM_CALL_FAILED",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::MalformedButton(_) | Self::MalformedLink(_))
    }

    /// Check if this error came from a platform call
    pub fn is_platform(&self) -> bool {
        matches!(self, Self::PlatformCall(_))
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidLayout(_))
    }

    /// Create a platform call error
    pub fn platform(msg: impl std::fmt::Display) -> Self {
        Self::PlatformCall(msg.to_string())
    }
}
