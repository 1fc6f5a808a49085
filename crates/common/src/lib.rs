//! Common utilities shared across oidc-session crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: error classification and the wall-clock abstraction
//! - `test-utils`: deterministic test helpers (`MockClock`)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
pub mod error;
#[cfg(feature = "foundation")]
pub mod time;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(all(feature = "foundation", any(feature = "test-utils", test)))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use error::{ErrorClassification, ErrorSeverity};
#[cfg(feature = "foundation")]
pub use time::{Clock, SystemClock};
