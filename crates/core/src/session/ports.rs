//! Port interfaces for the session manager
//!
//! These traits define the boundary between the session lifecycle logic and
//! the browser (or whatever hosts it): redirect parsing, silent checks,
//! one-way navigation and a localStorage-shaped key/value store.

use async_trait::async_trait;
use oidc_session_domain::{AuthConfig, AuthResult, ProviderError, StorageError};

/// Awaitable side of the identity provider protocol
#[async_trait]
pub trait IdentityTransport: Send + Sync {
    /// Parse the result the provider appended to the current URL
    ///
    /// Single-shot: the result belongs to one navigation and must not be
    /// replayed. An absent result yields an empty [`AuthResult`].
    async fn parse_redirect_result(&self) -> Result<AuthResult, ProviderError>;

    /// Ask the provider for fresh tokens without user interaction
    async fn check_session_silently(
        &self,
        config: &AuthConfig,
    ) -> Result<AuthResult, ProviderError>;

    /// Strip the redirect result from the visible URL without navigating
    fn clear_redirect_result(&self);
}

/// One-way navigation to the provider
///
/// Neither call returns anything useful: the page is expected to unload.
pub trait RedirectNavigator: Send + Sync {
    /// Send the browser to the provider's interactive login page
    fn begin_interactive_login(&self, config: &AuthConfig);

    /// Send the browser to the provider's logout endpoint
    fn begin_logout(&self, config: &AuthConfig);
}

/// Durable string key/value storage surviving page reloads
pub trait DurableStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
