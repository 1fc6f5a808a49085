//! Durable "a session existed before" flag
//!
//! The hint is not proof of a live provider session. It only tells the
//! manager whether a silent renewal is worth attempting on page load.
//! Storage failures are logged and read as "no hint"; they never reach the
//! caller.

use std::fmt;
use std::sync::Arc;

use oidc_session_domain::constants::HINT_TRUE_VALUE;
use tracing::warn;

use super::ports::DurableStorage;

/// Boolean flag (plus an optional failure counter) in durable storage
pub struct PersistedSessionHint {
    storage: Arc<dyn DurableStorage>,
    key: String,
    failures_key: Option<String>,
}

impl PersistedSessionHint {
    pub fn new(storage: Arc<dyn DurableStorage>, key: impl Into<String>) -> Self {
        Self { storage, key: key.into(), failures_key: None }
    }

    /// Also track consecutive renewal failures under `failures_key`
    #[must_use]
    pub fn with_failure_tracking(mut self, failures_key: impl Into<String>) -> Self {
        self.failures_key = Some(failures_key.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// `true` only when the stored value is exactly `"true"`
    pub fn read(&self) -> bool {
        match self.storage.get_item(&self.key) {
            Ok(value) => value.as_deref() == Some(HINT_TRUE_VALUE),
            Err(err) => {
                warn!(key = %self.key, error = %err, "Failed to read session hint; assuming none");
                false
            }
        }
    }

    /// Store `"true"`, or remove the entry for `false`
    ///
    /// Either way the failure counter starts over.
    pub fn write(&self, logged_in: bool) {
        let outcome = if logged_in {
            self.storage.set_item(&self.key, HINT_TRUE_VALUE)
        } else {
            self.storage.remove_item(&self.key)
        };
        if let Err(err) = outcome {
            warn!(key = %self.key, logged_in, error = %err, "Failed to write session hint");
        }
        self.reset_failures();
    }

    /// Current consecutive failure count; `0` when tracking is off
    pub fn failures(&self) -> u32 {
        let Some(key) = &self.failures_key else {
            return 0;
        };
        match self.storage.get_item(key) {
            Ok(value) => value.and_then(|v| v.trim().parse().ok()).unwrap_or(0),
            Err(err) => {
                warn!(key = %key, error = %err, "Failed to read renewal failure counter");
                0
            }
        }
    }

    /// Increment the failure counter and return the new value
    pub fn record_failure(&self) -> u32 {
        let Some(key) = &self.failures_key else {
            return 0;
        };
        let count = self.failures().saturating_add(1);
        if let Err(err) = self.storage.set_item(key, &count.to_string()) {
            warn!(key = %key, error = %err, "Failed to persist renewal failure counter");
        }
        count
    }

    pub fn reset_failures(&self) {
        let Some(key) = &self.failures_key else {
            return;
        };
        if let Err(err) = self.storage.remove_item(key) {
            warn!(key = %key, error = %err, "Failed to reset renewal failure counter");
        }
    }
}

impl fmt::Debug for PersistedSessionHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedSessionHint")
            .field("storage", &"DurableStorage")
            .field("key", &self.key)
            .field("failures_key", &self.failures_key)
            .finish()
    }
}
