//! Implicit-flow redirect transport
//!
//! Everything between the session manager and the browser:
//! - [`urls`]: authorize and logout URL construction
//! - [`transaction`]: `state`/`nonce` bookkeeping in durable storage
//! - [`fragment`]: parsing the `#access_token=...` redirect payload
//! - [`claims`]: decoding (not verifying) ID token claims
//! - [`transport`]: [`ImplicitFlowTransport`], implementing the core ports
//!
//! The browser itself is reached only through [`BrowserLocation`] and
//! [`SilentFrame`].

pub mod claims;
pub mod fragment;
pub mod transaction;
pub mod transport;
pub mod urls;

use async_trait::async_trait;
use thiserror::Error;

pub use transaction::{Transaction, TransactionStore};
pub use transport::ImplicitFlowTransport;

/// Hidden frame failure (blocked, navigation error, closed)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("silent frame failed: {0}")]
pub struct FrameError(pub String);

/// The page's location and history
pub trait BrowserLocation: Send + Sync {
    /// Full current URL
    fn href(&self) -> String;

    /// Navigate to `url`; the page is expected to unload
    fn assign(&self, url: &str);

    /// Rewrite the current history entry without navigating
    fn replace_state(&self, url: &str);
}

/// A hidden frame used for silent authorize requests
#[async_trait]
pub trait SilentFrame: Send + Sync {
    /// Load `url` and resolve to the URL the frame finally lands on
    async fn load(&self, url: &str) -> Result<String, FrameError>;
}
