//! Shared fakes for `oidc-session-infra` integration tests.
//!
//! `FakeBrowser` stands in for `window.location`/`history`, and `FakeProvider`
//! answers authorize URLs the way an implicit-flow provider would.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use oidc_session_infra::redirect::claims::encode_unsigned;
use oidc_session_infra::{BrowserLocation, FrameError, SilentFrame};
use parking_lot::Mutex;
use serde_json::json;
use url::Url;

pub const APP_URL: &str = "https://app.example.com/";
pub const CALLBACK_URL: &str = "https://app.example.com/callback";

/// Records navigations and history rewrites.
pub struct FakeBrowser {
    href: Mutex<String>,
    pub assigned: Mutex<Vec<String>>,
    pub replaced: Mutex<Vec<String>>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self {
            href: Mutex::new(APP_URL.to_string()),
            assigned: Mutex::new(Vec::new()),
            replaced: Mutex::new(Vec::new()),
        }
    }

    /// Simulate the provider sending the browser to `url`
    pub fn land_on(&self, url: &str) {
        *self.href.lock() = url.to_string();
    }

    pub fn current(&self) -> String {
        self.href.lock().clone()
    }

    pub fn last_assigned(&self) -> Option<String> {
        self.assigned.lock().last().cloned()
    }
}

impl BrowserLocation for FakeBrowser {
    fn href(&self) -> String {
        self.current()
    }

    fn assign(&self, url: &str) {
        self.assigned.lock().push(url.to_string());
    }

    fn replace_state(&self, url: &str) {
        self.replaced.lock().push(url.to_string());
        *self.href.lock() = url.to_string();
    }
}

/// Query parameters of a URL as a map.
pub fn query_map(url: &str) -> HashMap<String, String> {
    Url::parse(url).expect("valid url").query_pairs().into_owned().collect()
}

/// What the fake provider answers to the next authorize request.
#[derive(Clone)]
pub enum ProviderReply {
    /// Issue tokens echoing `state` and `nonce`
    Tokens { email: String, expires_in: i64 },
    /// Issue tokens whose ID token carries the wrong nonce
    WrongNonce,
    /// Redirect back with an OAuth error
    Error(String),
    /// Never answer
    Hang,
    /// Frame could not be loaded
    Blocked,
}

/// Simulated identity provider.
pub struct FakeProvider {
    reply: Mutex<ProviderReply>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new(reply: ProviderReply) -> Self {
        Self { reply: Mutex::new(reply), requests: Mutex::new(Vec::new()) }
    }

    pub fn tokens(email: &str) -> Self {
        Self::new(ProviderReply::Tokens { email: email.to_string(), expires_in: 3600 })
    }

    pub fn set_reply(&self, reply: ProviderReply) {
        *self.reply.lock() = reply;
    }

    /// Callback URL the provider redirects to for `authorize_url`
    pub fn callback_for(&self, authorize_url: &str) -> Option<String> {
        let params = query_map(authorize_url);
        let redirect = params.get("redirect_uri").cloned().unwrap_or_else(|| CALLBACK_URL.into());
        let state = params.get("state").cloned().unwrap_or_default();
        let nonce = params.get("nonce").cloned().unwrap_or_default();

        let fragment = match self.reply.lock().clone() {
            ProviderReply::Tokens { email, expires_in } => {
                let id_token = encode_unsigned(&json!({
                    "sub": "auth0|42",
                    "email": email,
                    "nonce": nonce,
                }));
                format!(
                    "access_token=at-{state}&id_token={id_token}&token_type=Bearer&expires_in={expires_in}&state={state}"
                )
            }
            ProviderReply::WrongNonce => {
                let id_token = encode_unsigned(&json!({ "nonce": "forged" }));
                format!("access_token=at&id_token={id_token}&expires_in=60&state={state}")
            }
            ProviderReply::Error(code) => {
                format!("error={code}&error_description=Provider+said+no&state={state}")
            }
            ProviderReply::Hang | ProviderReply::Blocked => return None,
        };
        Some(format!("{redirect}#{fragment}"))
    }
}

#[async_trait]
impl SilentFrame for FakeProvider {
    async fn load(&self, url: &str) -> Result<String, FrameError> {
        self.requests.lock().push(url.to_string());
        let reply = self.reply.lock().clone();
        match reply {
            ProviderReply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(FrameError("unreachable".into()))
            }
            ProviderReply::Blocked => Err(FrameError("X-Frame-Options: deny".into())),
            _ => self.callback_for(url).ok_or_else(|| FrameError("no answer".into())),
        }
    }
}

/// Convenience: an `Arc` of each fake.
pub fn fakes(reply: ProviderReply) -> (Arc<FakeBrowser>, Arc<FakeProvider>) {
    (Arc::new(FakeBrowser::new()), Arc::new(FakeProvider::new(reply)))
}
