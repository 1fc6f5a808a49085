//! Shared test helpers for `oidc-session-core` integration tests.
//!
//! Lightweight scripted mocks for the three ports so that tests can focus on
//! session behaviour instead of boilerplate.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use oidc_session_core::{DurableStorage, IdentityTransport, RedirectNavigator};
use oidc_session_domain::{AuthConfig, AuthResult, Claims, ProviderError, StorageError};
use parking_lot::Mutex;
use serde_json::json;

pub type TransportReply = Result<AuthResult, ProviderError>;

/// Scripted `IdentityTransport`.
///
/// Replies are consumed in order; an exhausted script yields an empty result
/// for redirects and a `login_required` error for silent checks.
#[derive(Default)]
pub struct MockTransport {
    redirect_replies: Mutex<VecDeque<TransportReply>>,
    silent_replies: Mutex<VecDeque<TransportReply>>,
    pub parse_calls: AtomicUsize,
    pub silent_calls: AtomicUsize,
    pub clear_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_redirect(self, reply: TransportReply) -> Self {
        self.redirect_replies.lock().push_back(reply);
        self
    }

    pub fn with_silent(self, reply: TransportReply) -> Self {
        self.silent_replies.lock().push_back(reply);
        self
    }

    pub fn parse_calls(&self) -> usize {
        self.parse_calls.load(Ordering::SeqCst)
    }

    pub fn silent_calls(&self) -> usize {
        self.silent_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityTransport for MockTransport {
    async fn parse_redirect_result(&self) -> Result<AuthResult, ProviderError> {
        self.parse_calls.fetch_add(1, Ordering::SeqCst);
        self.redirect_replies.lock().pop_front().unwrap_or_else(|| Ok(AuthResult::default()))
    }

    async fn check_session_silently(
        &self,
        _config: &AuthConfig,
    ) -> Result<AuthResult, ProviderError> {
        self.silent_calls.fetch_add(1, Ordering::SeqCst);
        self.silent_replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::new("login_required")))
    }

    fn clear_redirect_result(&self) {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records navigations instead of leaving the page.
#[derive(Default)]
pub struct MockNavigator {
    pub logins: AtomicUsize,
    pub logouts: AtomicUsize,
}

impl MockNavigator {
    pub fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn logouts(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }
}

impl RedirectNavigator for MockNavigator {
    fn begin_interactive_login(&self, _config: &AuthConfig) {
        self.logins.fetch_add(1, Ordering::SeqCst);
    }

    fn begin_logout(&self, _config: &AuthConfig) {
        self.logouts.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory `DurableStorage` that can be switched into a failing mode.
#[derive(Default)]
pub struct MockStorage {
    entries: Mutex<HashMap<String, String>>,
    failing: Mutex<bool>,
}

impl MockStorage {
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.lock().insert(key.to_string(), value.to_string());
        self
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    fn check(&self) -> Result<(), StorageError> {
        if *self.failing.lock() {
            return Err(StorageError::Unavailable("storage disabled".into()));
        }
        Ok(())
    }
}

impl DurableStorage for MockStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.lock().remove(key);
        Ok(())
    }
}

pub fn test_config() -> AuthConfig {
    AuthConfig::new(
        "tenant.example.com",
        "spa-client",
        "https://app.example.com/callback",
        "https://app.example.com/",
    )
}

pub fn claims(value: serde_json::Value) -> Claims {
    value.as_object().cloned().unwrap_or_default()
}

/// A complete result: both tokens, one hour lifetime, an email claim.
pub fn complete_result() -> AuthResult {
    AuthResult {
        access_token: Some("a".into()),
        id_token: Some("b".into()),
        expires_in_seconds: Some(3600),
        claims: Some(claims(json!({ "email": "x@y.com" }))),
        token_type: Some("Bearer".into()),
        ..Default::default()
    }
}

/// Bundle of mocks handed to a manager, kept so tests can inspect them.
pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub navigator: Arc<MockNavigator>,
    pub storage: Arc<MockStorage>,
}

impl Harness {
    pub fn new(transport: MockTransport, storage: MockStorage) -> Self {
        Self {
            transport: Arc::new(transport),
            navigator: Arc::new(MockNavigator::default()),
            storage: Arc::new(storage),
        }
    }
}

/// Events captured by [`capture_logs`]: level and rendered message.
pub type CapturedLogs = Arc<Mutex<Vec<(tracing::Level, String)>>>;

struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

struct RecordingLayer(CapturedLogs);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for RecordingLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0.lock().push((*event.metadata().level(), visitor.0));
    }
}

/// Record every event on the current thread until the guard is dropped.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    use tracing_subscriber::layer::SubscriberExt;

    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry().with(RecordingLayer(logs.clone()));
    (logs, tracing::subscriber::set_default(subscriber))
}
