//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use std::fmt;

use reaction_codec::CodecError;
use reaction_common::AppError;
use reaction_core::DomainError;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or failed platform call
    Domain(DomainError),

    /// Encoding a reaction post failed
    Codec(CodecError),

    /// A platform call failed; `step` names what was being done
    Platform {
        step: &'static str,
        source: DomainError,
    },

    /// Missing dependency or bad input
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Codec(e) => write!(f, "Codec error: {e}"),
            Self::Platform { step, source } => write!(f, "{step}: {source}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) | Self::Platform { source: e, .. } => Some(e),
            Self::Codec(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

impl ServiceError {
    /// Tag a failed platform call with the step it belongs to
    pub fn platform(step: &'static str, source: DomainError) -> Self {
        Self::Platform { step, source }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Check if a platform call failed
    pub fn is_platform(&self) -> bool {
        match self {
            Self::Platform { .. } => true,
            Self::Domain(e) => e.is_platform(),
            _ => false,
        }
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) | Self::Platform { source: e, .. } => e.code(),
            Self::Codec(_) => "CODEC_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<CodecError> for ServiceError {
    fn from(err: CodecError) -> Self {
        Self::Codec(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::Codec(e) => AppError::Domain(e.into()),
            ServiceError::Platform { step, source } => {
                AppError::transport(format!("{step}: {source}"))
            }
            ServiceError::Validation(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
