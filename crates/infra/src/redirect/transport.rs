//! Implicit-flow implementation of the identity transport ports

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use oidc_session_common::time::Clock;
use oidc_session_core::{DurableStorage, IdentityTransport, RedirectNavigator};
use oidc_session_domain::constants::FRAME_ERROR;
use oidc_session_domain::{AuthConfig, AuthResult, ProviderError};
use tracing::{debug, info, warn};
use url::Url;

use super::claims::decode_claims;
use super::fragment::parse_fragment;
use super::transaction::TransactionStore;
use super::urls::{authorize_url, logout_url, PROMPT_NONE};
use super::{BrowserLocation, SilentFrame};

const STATE_MISMATCH: &str = "`state` does not match.";
const NONCE_MISMATCH: &str = "Nonce does not match.";

/// Redirect transport speaking the implicit grant
///
/// Implements both [`IdentityTransport`] and [`RedirectNavigator`], so one
/// `Arc<ImplicitFlowTransport>` can be handed to the session manager twice.
pub struct ImplicitFlowTransport {
    location: Arc<dyn BrowserLocation>,
    frame: Arc<dyn SilentFrame>,
    transactions: TransactionStore,
}

impl ImplicitFlowTransport {
    pub fn new(
        location: Arc<dyn BrowserLocation>,
        frame: Arc<dyn SilentFrame>,
        storage: Arc<dyn DurableStorage>,
    ) -> Self {
        Self { location, frame, transactions: TransactionStore::new(storage) }
    }

    /// Stamp transactions with `clock` instead of the system clock
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.transactions = self.transactions.with_clock(clock);
        self
    }

    /// Validate a redirect fragment and turn it into an [`AuthResult`]
    ///
    /// # Errors
    ///
    /// - the provider's own error, when the fragment carries `error`
    /// - `invalid_token` for unknown `state`, nonce mismatch, undecodable ID
    ///   token or non-numeric `expires_in`
    pub fn process_fragment(&self, fragment: &str) -> Result<AuthResult, ProviderError> {
        let response = parse_fragment(fragment)?;
        if response.is_empty() {
            return Ok(AuthResult::default());
        }

        let transaction = response.state.as_deref().and_then(|s| self.transactions.consume(s));

        if let Some(error) = response.error {
            debug!(code = %error.code, "Provider returned an error response");
            return Err(error);
        }

        let Some(transaction) = transaction else {
            warn!("Rejecting response with unknown state");
            return Err(ProviderError::invalid_token(STATE_MISMATCH));
        };

        let claims = match &response.id_token {
            Some(id_token) => {
                let claims = decode_claims(id_token)?;
                let nonce = claims.get("nonce").and_then(serde_json::Value::as_str);
                if nonce != Some(transaction.nonce.as_str()) {
                    warn!("Rejecting ID token with mismatched nonce");
                    return Err(ProviderError::invalid_token(NONCE_MISMATCH));
                }
                Some(claims)
            }
            None => None,
        };

        Ok(AuthResult {
            access_token: response.access_token,
            id_token: response.id_token,
            expires_in_seconds: response.expires_in,
            claims,
            token_type: response.token_type,
            scope: response.scope,
            state: Some(transaction.state),
        })
    }
}

#[async_trait]
impl IdentityTransport for ImplicitFlowTransport {
    async fn parse_redirect_result(&self) -> Result<AuthResult, ProviderError> {
        let href = self.location.href();
        match fragment_of(&href) {
            Some(fragment) => self.process_fragment(&fragment),
            None => Ok(AuthResult::default()),
        }
    }

    async fn check_session_silently(
        &self,
        config: &AuthConfig,
    ) -> Result<AuthResult, ProviderError> {
        let transaction = self.transactions.begin();
        let url = authorize_url(config, &transaction, Some(PROMPT_NONE));

        let outcome = match tokio::time::timeout(config.silent_timeout(), self.frame.load(&url)).await
        {
            Ok(Ok(landed)) => self.process_fragment(&fragment_of(&landed).unwrap_or_default()),
            Ok(Err(err)) => Err(ProviderError::new(FRAME_ERROR).with_description(err.to_string())),
            Err(_) => {
                warn!(timeout_ms = config.silent_timeout_ms, "Silent authentication timed out");
                Err(ProviderError::timeout(format!(
                    "Silent authentication did not complete within {} ms",
                    config.silent_timeout_ms
                )))
            }
        };

        // No-op when the landing already consumed it
        self.transactions.discard(&transaction.state);
        outcome
    }

    fn clear_redirect_result(&self) {
        let href = self.location.href();
        let Ok(mut url) = Url::parse(&href) else {
            warn!("Current location is not a valid URL; leaving it untouched");
            return;
        };
        if !url.fragment().is_some_and(carries_response) {
            return;
        }
        url.set_fragment(None);
        self.location.replace_state(url.as_str());
    }
}

impl RedirectNavigator for ImplicitFlowTransport {
    fn begin_interactive_login(&self, config: &AuthConfig) {
        let transaction = self.transactions.begin();
        info!(domain = %config.domain, "Redirecting to provider login");
        self.location.assign(&authorize_url(config, &transaction, None));
    }

    fn begin_logout(&self, config: &AuthConfig) {
        info!(domain = %config.domain, "Redirecting to provider logout");
        self.location.assign(&logout_url(config));
    }
}

impl fmt::Debug for ImplicitFlowTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplicitFlowTransport")
            .field("location", &"BrowserLocation")
            .field("frame", &"SilentFrame")
            .field("transactions", &self.transactions)
            .finish()
    }
}

/// Non-empty fragment of `href`, if it parses as a URL
fn fragment_of(href: &str) -> Option<String> {
    let url = Url::parse(href).ok()?;
    url.fragment().filter(|f| !f.is_empty()).map(str::to_string)
}

/// Whether a fragment holds implicit-flow response parameters
///
/// Client-side routes such as `#/dashboard` do not.
fn carries_response(fragment: &str) -> bool {
    parse_fragment(fragment).map_or(true, |response| !response.is_empty())
}
