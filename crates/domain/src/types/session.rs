//! In-memory session state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::auth::{AuthResult, Claims};

/// Access and ID token, always held together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    pub access_token: String,
    pub id_token: String,
}

/// Everything the manager knows about the current session
///
/// Replaced wholesale on every transition. Tokens may outlive `expires_at`;
/// expiry is only ever judged through [`SessionState::is_authenticated_at`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub tokens: Option<SessionTokens>,
    /// Epoch milliseconds; `0` when no session was ever established
    pub expires_at: i64,
    pub profile: Option<Claims>,
}

impl SessionState {
    /// Build the state for a complete result received at `now_ms`
    ///
    /// Returns `None` when the result lacks either token.
    pub fn from_result(result: &AuthResult, now_ms: i64) -> Option<Self> {
        let (access, id) = result.token_pair()?;
        Some(Self {
            tokens: Some(SessionTokens { access_token: access.to_string(), id_token: id.to_string() }),
            expires_at: now_ms.saturating_add(result.expires_in_millis()),
            profile: result.claims.clone(),
        })
    }

    pub fn is_authenticated_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at
    }

    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    pub fn id_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.id_token.as_str())
    }

    pub fn profile(&self) -> Option<&Claims> {
        self.profile.as_ref()
    }

    /// Expiry as a UTC timestamp, `None` when no session was established
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        if self.expires_at <= 0 {
            return None;
        }
        DateTime::<Utc>::from_timestamp_millis(self.expires_at)
    }

    /// Whole seconds left at `now_ms`, never negative
    pub fn seconds_until_expiry(&self, now_ms: i64) -> i64 {
        (self.expires_at.saturating_sub(now_ms)).max(0) / 1000
    }
}

/// Result of a silent renewal attempt that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum RenewalOutcome {
    /// Fresh tokens were installed
    Renewed(AuthResult),
    /// No prior session was recorded, so the provider was not contacted
    NoPriorSession,
}

impl RenewalOutcome {
    pub fn is_renewed(&self) -> bool {
        matches!(self, Self::Renewed(_))
    }
}
