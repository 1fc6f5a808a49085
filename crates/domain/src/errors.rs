//! Error types used throughout the session manager

use std::time::Duration;

use oidc_session_common::error::{ErrorClassification, ErrorSeverity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ErrorCategory, ProviderError};

/// Durable storage failures
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Storage serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl ErrorClassification for StorageError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Io(_))
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Unavailable(_) | Self::Io(_) => ErrorSeverity::Warning,
            Self::Serialization(_) => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Main error type for session operations
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SessionError {
    /// The provider answered without both tokens
    #[error("Malformed authentication result: {0}")]
    MalformedResult(String),

    /// Raw provider error from the redirect callback
    #[error("Identity provider error: {0}")]
    Transport(ProviderError),

    #[error("Interaction required: {0}")]
    InteractionRequired(ProviderError),

    #[error("Consent required: {0}")]
    ConsentRequired(ProviderError),

    #[error("Transient renewal failure: {0}")]
    Transient(ProviderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// Wrap a provider error in the variant matching `category`
    pub fn classified(category: ErrorCategory, source: ProviderError) -> Self {
        match category {
            ErrorCategory::InteractionRequired => Self::InteractionRequired(source),
            ErrorCategory::ConsentRequired => Self::ConsentRequired(source),
            ErrorCategory::Transient => Self::Transient(source),
        }
    }

    /// Category of a classified renewal failure
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::InteractionRequired(_) => Some(ErrorCategory::InteractionRequired),
            Self::ConsentRequired(_) => Some(ErrorCategory::ConsentRequired),
            Self::Transient(_) => Some(ErrorCategory::Transient),
            _ => None,
        }
    }

    /// Provider error carried by this failure, if any
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::Transport(e)
            | Self::InteractionRequired(e)
            | Self::ConsentRequired(e)
            | Self::Transient(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the UI should prompt for an interactive login
    pub fn requires_login(&self) -> bool {
        self.category().is_some_and(ErrorCategory::requires_login)
    }
}

impl ErrorClassification for SessionError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Transient(_) => true,
            Self::Storage(e) => e.is_retryable(),
            _ => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InteractionRequired(_) => ErrorSeverity::Info,
            Self::ConsentRequired(_) | Self::Transient(_) => ErrorSeverity::Warning,
            Self::MalformedResult(_) | Self::Transport(_) | Self::Config(_) => ErrorSeverity::Error,
            Self::Storage(e) => e.severity(),
        }
    }

    fn is_critical(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_critical(),
            _ => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Storage(e) => e.retry_after(),
            _ => None,
        }
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
