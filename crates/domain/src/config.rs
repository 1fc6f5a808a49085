//! Construction-time configuration for the session manager
//!
//! [`AuthConfig`] is immutable once handed to the manager. It is usually
//! produced by the infra config loader, but can be built in code:
//!
//! ```rust
//! use oidc_session_domain::{AuthConfig, RenewalPolicy};
//!
//! let config = AuthConfig::new(
//!     "tenant.example.com",
//!     "spa-client",
//!     "https://app.example.com/callback",
//!     "https://app.example.com/",
//! )
//! .with_audience("https://api.example.com")
//! .with_renewal_policy(RenewalPolicy::clear_after(3));
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.authorize_endpoint(), "https://tenant.example.com/authorize");
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    AUTHORIZE_PATH, DEFAULT_HINT_KEY, DEFAULT_SCOPE, DEFAULT_SILENT_TIMEOUT_MS, LOGOUT_PATH,
    RENEWAL_FAILURES_SUFFIX,
};
use crate::errors::{Result, SessionError};
use crate::impl_domain_enum_conversions;

/// Which tokens the authorize request asks the provider to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResponseType {
    #[serde(rename = "token")]
    Token,
    #[serde(rename = "id_token")]
    IdToken,
    #[default]
    #[serde(rename = "token id_token")]
    TokenIdToken,
}

impl_domain_enum_conversions!(ResponseType {
    Token => "token",
    IdToken => "id_token",
    TokenIdToken => "token id_token",
});

/// What to do when silent renewal keeps failing
///
/// Disabled by default: failed renewals leave the persisted hint alone, so the
/// next page load tries again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalPolicy {
    /// Clear the session after this many consecutive failed renewals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_consecutive_failures: Option<u32>,
}

impl RenewalPolicy {
    /// Never clear the session because of renewal failures
    #[must_use]
    pub const fn disabled() -> Self {
        Self { max_consecutive_failures: None }
    }

    /// Clear the session once `failures` renewals in a row have failed
    #[must_use]
    pub const fn clear_after(failures: u32) -> Self {
        Self { max_consecutive_failures: Some(failures) }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.max_consecutive_failures.is_some()
    }
}

/// Identity provider and application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    /// Tenant host of the identity provider, without scheme
    pub domain: String,
    pub client_id: String,
    /// Where the provider sends the browser after login
    pub redirect_uri: String,
    /// Where the provider sends the browser after logout
    pub logout_redirect_uri: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default)]
    pub response_type: ResponseType,
    /// API identifier requested for the access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(default = "default_silent_timeout_ms")]
    pub silent_timeout_ms: u64,
    /// Durable storage key of the persisted session hint
    #[serde(default = "default_hint_key")]
    pub hint_key: String,
    #[serde(default)]
    pub renewal: RenewalPolicy,
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_string()
}

fn default_silent_timeout_ms() -> u64 {
    DEFAULT_SILENT_TIMEOUT_MS
}

fn default_hint_key() -> String {
    DEFAULT_HINT_KEY.to_string()
}

impl AuthConfig {
    /// Create a configuration with the required fields and defaults elsewhere
    pub fn new(
        domain: impl Into<String>,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        logout_redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            logout_redirect_uri: logout_redirect_uri.into(),
            scope: default_scope(),
            response_type: ResponseType::default(),
            audience: None,
            silent_timeout_ms: DEFAULT_SILENT_TIMEOUT_MS,
            hint_key: default_hint_key(),
            renewal: RenewalPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    #[must_use]
    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    #[must_use]
    pub fn with_silent_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.silent_timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn with_hint_key(mut self, hint_key: impl Into<String>) -> Self {
        self.hint_key = hint_key.into();
        self
    }

    #[must_use]
    pub fn with_renewal_policy(mut self, policy: RenewalPolicy) -> Self {
        self.renewal = policy;
        self
    }

    /// Check required fields and URL shapes
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("domain", &self.domain)?;
        require_non_empty("clientId", &self.client_id)?;
        require_non_empty("redirectUri", &self.redirect_uri)?;
        require_non_empty("logoutRedirectUri", &self.logout_redirect_uri)?;
        require_non_empty("hintKey", &self.hint_key)?;

        if self.domain.contains("://") || self.domain.contains('/') {
            return Err(SessionError::Config(format!(
                "domain must be a bare host, got '{}'",
                self.domain
            )));
        }
        let base = Url::parse(&format!("https://{}", self.domain))
            .map_err(|e| SessionError::Config(format!("invalid domain '{}': {e}", self.domain)))?;
        if base.host_str().is_none() {
            return Err(SessionError::Config(format!("domain '{}' has no host", self.domain)));
        }

        Url::parse(&self.redirect_uri)
            .map_err(|e| SessionError::Config(format!("invalid redirectUri: {e}")))?;
        Url::parse(&self.logout_redirect_uri)
            .map_err(|e| SessionError::Config(format!("invalid logoutRedirectUri: {e}")))?;

        // A session needs both tokens, so narrower grants can never log in
        if self.response_type != ResponseType::TokenIdToken {
            return Err(SessionError::Config(format!(
                "responseType must be '{}', got '{}'",
                ResponseType::TokenIdToken,
                self.response_type
            )));
        }

        if self.silent_timeout_ms == 0 {
            return Err(SessionError::Config("silentTimeoutMs must be greater than 0".into()));
        }
        if self.renewal.max_consecutive_failures == Some(0) {
            return Err(SessionError::Config(
                "renewal.maxConsecutiveFailures must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Provider authorize endpoint
    pub fn authorize_endpoint(&self) -> String {
        format!("https://{}{}", self.domain, AUTHORIZE_PATH)
    }

    /// Provider logout endpoint
    pub fn logout_endpoint(&self) -> String {
        format!("https://{}{}", self.domain, LOGOUT_PATH)
    }

    pub fn silent_timeout(&self) -> Duration {
        Duration::from_millis(self.silent_timeout_ms)
    }

    /// Storage key of the consecutive renewal failure counter
    pub fn renewal_failures_key(&self) -> String {
        format!("{}{}", self.hint_key, RENEWAL_FAILURES_SUFFIX)
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SessionError::Config(format!("{field} must not be empty")));
    }
    Ok(())
}
