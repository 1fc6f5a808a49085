//! # oidc-session Domain
//!
//! Data types for the implicit-flow session manager.
//!
//! This crate contains:
//! - Construction-time configuration (`AuthConfig`, `ResponseType`,
//!   `RenewalPolicy`)
//! - Redirect results, provider errors and in-memory session state
//! - Domain error types and Result definitions
//! - Well-known provider error codes and storage keys
//!
//! ## Architecture
//! - Depends only on `oidc-session-common` for error classification
//! - No I/O, no async, no browser concepts

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
