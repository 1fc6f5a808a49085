//! # oidc-session Infrastructure
//!
//! Adapter implementations of the `oidc-session-core` ports.
//!
//! This crate contains:
//! - Configuration loading (environment, `.env`, JSON/TOML files)
//! - Durable storage adapters (in-memory, JSON file)
//! - The implicit-flow redirect transport (URL building, fragment parsing,
//!   state/nonce transactions, silent checks with a timeout)
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `oidc-session-core`
//! - Browser primitives (navigation, hidden frames) stay behind the
//!   `BrowserLocation` and `SilentFrame` traits

pub mod config;
pub mod observability;
pub mod redirect;
pub mod storage;

// Re-export commonly used items
pub use redirect::{BrowserLocation, FrameError, ImplicitFlowTransport, SilentFrame};
pub use storage::{FileStorage, MemoryStorage};
