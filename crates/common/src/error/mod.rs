//! Error classification shared by every oidc-session crate
//!
//! Module-specific error enums stay local to their crate (see
//! `oidc-session-domain::errors`), but they all implement
//! [`ErrorClassification`] so that callers can make uniform decisions:
//!
//! - **`is_retryable()`**: would trying again later plausibly succeed?
//! - **`severity()`**: how loudly should this be logged or surfaced?
//! - **`is_critical()`**: does this indicate a bug or broken invariant?
//! - **`retry_after()`**: suggested delay, when the source provides one
//!
//! ## ErrorSeverity Levels
//!
//! | Level | Use Case | Examples |
//! |-------|----------|----------|
//! | **Info** | Expected conditions | No active provider session on first visit |
//! | **Warning** | Degraded but operational | Transient provider failure, consent needed |
//! | **Error** | Failure requiring attention | Malformed redirect payload, bad config |
//! | **Critical** | Integrity at risk | Invariant violations |
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use oidc_session_common::error::{ErrorClassification, ErrorSeverity};
//!
//! #[derive(Debug)]
//! enum FetchError {
//!     Offline,
//!     Rejected,
//! }
//!
//! impl ErrorClassification for FetchError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, Self::Offline)
//!     }
//!
//!     fn severity(&self) -> ErrorSeverity {
//!         match self {
//!             Self::Offline => ErrorSeverity::Warning,
//!             Self::Rejected => ErrorSeverity::Error,
//!         }
//!     }
//!
//!     fn is_critical(&self) -> bool {
//!         false
//!     }
//!
//!     fn retry_after(&self) -> Option<Duration> {
//!         None
//!     }
//! }
//!
//! assert!(FetchError::Offline.is_retryable());
//! assert!(FetchError::Rejected.severity() > ErrorSeverity::Warning);
//! ```

use std::fmt;
use std::time::Duration;

/// Error classification trait for consistent error handling across crates
///
/// This trait provides a standard interface for classifying errors by their
/// characteristics, enabling consistent logging and UI decisions.
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors are transient issues that may succeed if attempted
    /// again later, such as a provider outage or a timed-out silent check.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    ///
    /// Used for logging and surfacing decisions.
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;

    /// Get the suggested retry delay if applicable
    fn retry_after(&self) -> Option<Duration>;
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Informational, typically an expected condition
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl ErrorSeverity {
    /// Lowercase label suitable for structured log fields
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
