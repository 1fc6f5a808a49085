//! Session lifecycle orchestration
//!
//! `SessionManager` owns the in-memory [`SessionState`] and drives the
//! identity transport:
//! - `login()` / `logout()` hand off to the [`RedirectNavigator`]
//! - `handle_authentication()` consumes the redirect result once
//! - `renew_session()` silently refreshes tokens when the hint says a session
//!   existed before
//!
//! Expiry is judged only by `is_authenticated()`; token accessors may return
//! stale values.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use oidc_session_common::error::{ErrorClassification, ErrorSeverity};
use oidc_session_common::time::{Clock, SystemClock};
use oidc_session_domain::constants::MALFORMED_RESULT_MESSAGE;
use oidc_session_domain::{
    AuthConfig, AuthResult, Claims, ErrorCategory, RenewalOutcome, Result,
    SessionError, SessionState,
};
use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use super::classifier::ErrorClassifier;
use super::hint::PersistedSessionHint;
use super::ports::{DurableStorage, IdentityTransport, RedirectNavigator};

/// Implicit-flow session manager
pub struct SessionManager {
    config: AuthConfig,
    transport: Arc<dyn IdentityTransport>,
    navigator: Arc<dyn RedirectNavigator>,
    hint: PersistedSessionHint,
    classifier: ErrorClassifier,
    clock: Arc<dyn Clock>,
    state: RwLock<SessionState>,
}

impl SessionManager {
    /// Create a manager with an empty session
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] when `config` fails validation.
    pub fn new(
        config: AuthConfig,
        transport: Arc<dyn IdentityTransport>,
        navigator: Arc<dyn RedirectNavigator>,
        storage: Arc<dyn DurableStorage>,
    ) -> Result<Self> {
        config.validate()?;

        let mut hint = PersistedSessionHint::new(storage, config.hint_key.clone());
        if config.renewal.is_enabled() {
            hint = hint.with_failure_tracking(config.renewal_failures_key());
        }

        Ok(Self {
            config,
            transport,
            navigator,
            hint,
            classifier: ErrorClassifier::default(),
            clock: Arc::new(SystemClock),
            state: RwLock::new(SessionState::default()),
        })
    }

    /// Replace the wall clock (tests use `MockClock`)
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the provider error classifier
    #[must_use]
    pub fn with_classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Start an interactive login; the page is expected to navigate away
    pub fn login(&self) {
        info!(domain = %self.config.domain, "Starting interactive login");
        self.navigator.begin_interactive_login(&self.config);
    }

    /// Consume the redirect result after the provider sends the browser back
    ///
    /// The redirect result is stripped from the URL whatever the outcome.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Transport`] when the provider returned an error
    /// - [`SessionError::MalformedResult`] when either token is missing
    pub async fn handle_authentication(&self) -> Result<AuthResult> {
        let parsed = self.transport.parse_redirect_result().await;
        self.transport.clear_redirect_result();

        let result = parsed.map_err(|provider_error| {
            error!(
                code = %provider_error.code,
                description = provider_error.description.as_deref().unwrap_or_default(),
                "Identity provider rejected authentication"
            );
            SessionError::Transport(provider_error)
        })?;

        self.set_session(&result)?;
        info!(expires_at = self.expires_at(), "Authentication completed");
        Ok(result)
    }

    /// Silently renew the session if a previous one was recorded
    ///
    /// Classified failures leave the in-memory state and the hint untouched,
    /// unless a renewal failure policy is configured and its threshold is
    /// reached.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InteractionRequired`], [`SessionError::ConsentRequired`]
    ///   or [`SessionError::Transient`] depending on the provider error code
    /// - [`SessionError::MalformedResult`] when either token is missing
    pub async fn renew_session(&self) -> Result<RenewalOutcome> {
        if !self.hint.read() {
            debug!(hint_key = %self.hint.key(), "No prior session recorded; skipping silent renewal");
            return Ok(RenewalOutcome::NoPriorSession);
        }

        let result = match self.transport.check_session_silently(&self.config).await {
            Ok(result) => result,
            Err(provider_error) => {
                let category = self.classifier.classify(&provider_error);
                let err = SessionError::classified(category, provider_error);
                log_renewal_failure(&err);
                self.note_renewal_failure();
                return Err(err);
            }
        };

        if let Err(err) = self.set_session(&result) {
            self.note_renewal_failure();
            return Err(err);
        }
        info!(expires_at = self.expires_at(), "Session renewed silently");
        Ok(RenewalOutcome::Renewed(result))
    }

    /// Drop the local session and send the browser to the provider logout
    pub fn logout(&self) {
        self.clear_session();
        info!("Session cleared; redirecting to provider logout");
        self.navigator.begin_logout(&self.config);
    }

    /// `true` while the clock is before the recorded expiry
    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated_at(self.clock.millis_since_epoch())
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.read().access_token().map(str::to_string)
    }

    pub fn id_token(&self) -> Option<String> {
        self.state.read().id_token().map(str::to_string)
    }

    /// Decoded ID token claims; never verified
    pub fn profile(&self) -> Option<Claims> {
        self.state.read().profile().cloned()
    }

    /// Expiry in epoch milliseconds, `0` without a session
    pub fn expires_at(&self) -> i64 {
        self.state.read().expires_at
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        self.state.read().expires_at_utc()
    }

    pub fn seconds_until_expiry(&self) -> i64 {
        self.state.read().seconds_until_expiry(self.clock.millis_since_epoch())
    }

    /// Whether the persisted hint records a prior session
    pub fn has_prior_session(&self) -> bool {
        self.hint.read()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    fn set_session(&self, result: &AuthResult) -> Result<()> {
        let now = self.clock.millis_since_epoch();
        let Some(state) = SessionState::from_result(result, now) else {
            error!(
                has_access_token = result.access_token.is_some(),
                has_id_token = result.id_token.is_some(),
                "Authentication result is missing tokens"
            );
            return Err(SessionError::MalformedResult(MALFORMED_RESULT_MESSAGE.to_string()));
        };

        *self.state.write() = state;
        self.hint.write(true);
        Ok(())
    }

    fn clear_session(&self) {
        *self.state.write() = SessionState::default();
        self.hint.write(false);
    }

    fn note_renewal_failure(&self) {
        let Some(limit) = self.config.renewal.max_consecutive_failures else {
            return;
        };
        let failures = self.hint.record_failure();
        if failures >= limit {
            warn!(failures, limit, "Silent renewal keeps failing; clearing session");
            self.clear_session();
        }
    }
}

/// Log a classified renewal failure at the level its severity calls for
fn log_renewal_failure(err: &SessionError) {
    let Some(provider_error) = err.provider_error() else {
        return;
    };
    let message = match err.category() {
        Some(ErrorCategory::InteractionRequired) => {
            "Silent renewal needs an interactive login: the provider has no active session for \
             this user"
        }
        Some(ErrorCategory::ConsentRequired) => {
            "Silent renewal needs user consent: first-party consent may be disabled for this \
             client, or the requested scope needs approval"
        }
        _ => "Silent renewal failed; will retry on next page load",
    };
    let code = provider_error.code.as_str();
    let description = provider_error.description.as_deref().unwrap_or_default();
    let retryable = err.is_retryable();

    match err.severity() {
        ErrorSeverity::Info => info!(code, description, retryable, "{message}"),
        ErrorSeverity::Warning => warn!(code, description, retryable, "{message}"),
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(code, description, retryable, "{message}");
        }
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("domain", &self.config.domain)
            .field("transport", &"IdentityTransport")
            .field("navigator", &"RedirectNavigator")
            .field("hint", &self.hint)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
