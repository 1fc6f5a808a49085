//! Redirect results and provider errors
//!
//! These are the values an identity transport hands back to the session
//! manager. Claims are decoded from the ID token but never verified here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{INVALID_TOKEN, TIMEOUT};

/// Decoded identity claims (a JSON object)
pub type Claims = serde_json::Map<String, serde_json::Value>;

/// Tokens and metadata parsed from a provider response
///
/// Every field is optional because providers may legitimately omit any of
/// them; the session manager decides which combinations are acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    /// Lifetime of the access token in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims: Option<Claims>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl AuthResult {
    /// Both tokens, when both are present and non-empty
    pub fn token_pair(&self) -> Option<(&str, &str)> {
        let access = self.access_token.as_deref().filter(|t| !t.is_empty())?;
        let id = self.id_token.as_deref().filter(|t| !t.is_empty())?;
        Some((access, id))
    }

    pub fn is_complete(&self) -> bool {
        self.token_pair().is_some()
    }

    /// `true` when nothing at all was parsed
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Lifetime in milliseconds; absent or negative lifetimes count as zero
    pub fn expires_in_millis(&self) -> i64 {
        self.expires_in_seconds.unwrap_or(0).max(0).saturating_mul(1000)
    }

    /// Look up a single claim
    pub fn claim(&self, name: &str) -> Option<&serde_json::Value> {
        self.claims.as_ref()?.get(name)
    }
}

/// Error response from the identity provider
///
/// Mirrors the OAuth 2.0 error response (RFC 6749 §4.2.2.1); transports also
/// use it for their own failures (`timeout`, `frame_error`, `invalid_token`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    #[serde(rename = "error")]
    pub code: String,
    #[serde(rename = "error_description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProviderError {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into(), description: None }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Response failed local validation (state, nonce, claims, lifetime)
    pub fn invalid_token(description: impl Into<String>) -> Self {
        Self::new(INVALID_TOKEN).with_description(description)
    }

    /// Silent check did not finish in time
    pub fn timeout(description: impl Into<String>) -> Self {
        Self::new(TIMEOUT).with_description(description)
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "{}: {}", self.code, desc),
            None => write!(f, "{}", self.code),
        }
    }
}

impl std::error::Error for ProviderError {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn token_pair_requires_both_non_empty_tokens() {
        let full = AuthResult {
            access_token: Some("a".into()),
            id_token: Some("b".into()),
            ..Default::default()
        };
        assert_eq!(full.token_pair(), Some(("a", "b")));

        let blank_id = AuthResult { id_token: Some(String::new()), ..full.clone() };
        assert!(!blank_id.is_complete());

        let no_access = AuthResult { access_token: None, ..full };
        assert!(no_access.token_pair().is_none());
    }

    #[test]
    fn expires_in_millis_clamps() {
        let result = AuthResult { expires_in_seconds: Some(3600), ..Default::default() };
        assert_eq!(result.expires_in_millis(), 3_600_000);

        let negative = AuthResult { expires_in_seconds: Some(-5), ..Default::default() };
        assert_eq!(negative.expires_in_millis(), 0);
        assert_eq!(AuthResult::default().expires_in_millis(), 0);
    }

    #[test]
    fn claim_lookup() {
        let claims = json!({ "email": "x@y.com" }).as_object().cloned();
        let result = AuthResult { claims, ..Default::default() };
        assert_eq!(result.claim("email"), Some(&json!("x@y.com")));
        assert!(result.claim("name").is_none());
        assert!(!result.is_empty());
        assert!(AuthResult::default().is_empty());
    }

    #[test]
    fn provider_error_display() {
        let bare = ProviderError::new("login_required");
        assert_eq!(bare.to_string(), "login_required");

        let described = ProviderError::invalid_token("Nonce does not match.");
        assert_eq!(described.to_string(), "invalid_token: Nonce does not match.");
    }

    #[test]
    fn provider_error_uses_oauth_field_names() {
        let parsed: ProviderError = serde_json::from_value(json!({
            "error": "consent_required",
            "error_description": "Consent required"
        }))
        .unwrap();

        assert_eq!(parsed.code, "consent_required");
        assert_eq!(parsed.description.as_deref(), Some("Consent required"));
    }
}
