//! Authorize request transactions
//!
//! Each authorize navigation records its `nonce` under
//! `oidc-session.tx.{state}`. A response is accepted only if its `state`
//! matches a recorded transaction younger than [`TRANSACTION_TTL_MS`], which
//! is removed on first use.
//!
//! Pending states are also listed under [`TRANSACTION_INDEX_KEY`] so that
//! abandoned transactions can be purged: every [`TransactionStore::begin`]
//! drops entries that have outlived the TTL.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use oidc_session_common::time::{Clock, SystemClock};
use oidc_session_core::DurableStorage;
use oidc_session_domain::constants::{
    TRANSACTION_INDEX_KEY, TRANSACTION_KEY_PREFIX, TRANSACTION_TTL_MS,
};
use oidc_session_domain::StorageError;
use parking_lot::Mutex;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One pending authorize request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Never stored in the value; it is the key suffix
    #[serde(skip)]
    pub state: String,
    pub nonce: String,
    /// Epoch milliseconds
    pub created_at: i64,
}

impl Transaction {
    fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.created_at) > TRANSACTION_TTL_MS
    }
}

/// Generate a random URL-safe token (32 bytes, base64url, no padding)
pub fn generate_random_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Records and consumes transactions in durable storage
pub struct TransactionStore {
    storage: Arc<dyn DurableStorage>,
    clock: Arc<dyn Clock>,
    /// Serializes read-modify-write cycles on the index entry
    index_lock: Mutex<()>,
}

impl TransactionStore {
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        Self { storage, clock: Arc::new(SystemClock), index_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Create a transaction with fresh `state` and `nonce` and persist it
    ///
    /// Expired transactions are purged first. A storage failure is logged;
    /// the returned transaction is still usable for navigation, but its
    /// response will fail `state` validation.
    pub fn begin(&self) -> Transaction {
        let now = self.clock.millis_since_epoch();
        let transaction = Transaction {
            state: generate_random_token(),
            nonce: generate_random_token(),
            created_at: now,
        };

        let _guard = self.index_lock.lock();
        let mut pending = self.purge_expired(now);

        let stored = serde_json::to_string(&transaction)
            .map_err(StorageError::from)
            .and_then(|value| self.storage.set_item(&storage_key(&transaction.state), &value));

        match stored {
            Ok(()) => {
                pending.push(transaction.state.clone());
                debug!(pending = pending.len(), "Recorded authorize transaction");
            }
            Err(err) => warn!(error = %err, "Failed to record authorize transaction"),
        }
        self.write_index(&pending);
        transaction
    }

    /// Remove and return the transaction recorded for `state`
    ///
    /// Unknown, unreadable, corrupt or expired entries all yield `None`.
    pub fn consume(&self, state: &str) -> Option<Transaction> {
        if state.is_empty() {
            return None;
        }
        let _guard = self.index_lock.lock();

        let raw = match self.storage.get_item(&storage_key(state)) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "Failed to read authorize transaction");
                None
            }
        };
        self.forget(state);

        let mut transaction = match serde_json::from_str::<Transaction>(&raw?) {
            Ok(transaction) => transaction,
            Err(err) => {
                warn!(error = %err, "Discarding corrupt authorize transaction");
                return None;
            }
        };
        if transaction.is_expired_at(self.clock.millis_since_epoch()) {
            warn!(created_at = transaction.created_at, "Rejecting expired authorize transaction");
            return None;
        }
        transaction.state = state.to_string();
        Some(transaction)
    }

    /// Drop the transaction for `state` without reading it
    pub fn discard(&self, state: &str) {
        let _guard = self.index_lock.lock();
        self.forget(state);
    }

    /// Remove the entry for `state` and its index slot; caller holds the lock
    fn forget(&self, state: &str) {
        if let Err(err) = self.storage.remove_item(&storage_key(state)) {
            warn!(error = %err, "Failed to remove authorize transaction");
        }
        let mut pending = self.read_index();
        let before = pending.len();
        pending.retain(|s| s != state);
        if pending.len() != before {
            self.write_index(&pending);
        }
    }

    /// Remove expired or dangling entries and return the live states
    fn purge_expired(&self, now_ms: i64) -> Vec<String> {
        let mut live = Vec::new();
        let mut purged = 0usize;

        for state in self.read_index() {
            let key = storage_key(&state);
            let keep = match self.storage.get_item(&key) {
                Ok(Some(raw)) => serde_json::from_str::<Transaction>(&raw)
                    .is_ok_and(|tx| !tx.is_expired_at(now_ms)),
                Ok(None) => false,
                Err(err) => {
                    warn!(error = %err, "Failed to read authorize transaction during purge");
                    true
                }
            };

            if keep {
                live.push(state);
            } else {
                purged += 1;
                if let Err(err) = self.storage.remove_item(&key) {
                    warn!(error = %err, "Failed to purge authorize transaction");
                }
            }
        }

        if purged > 0 {
            debug!(purged, "Purged stale authorize transactions");
        }
        live
    }

    fn read_index(&self) -> Vec<String> {
        match self.storage.get_item(TRANSACTION_INDEX_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "Discarding corrupt transaction index");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "Failed to read transaction index");
                Vec::new()
            }
        }
    }

    fn write_index(&self, pending: &[String]) {
        let written = if pending.is_empty() {
            self.storage.remove_item(TRANSACTION_INDEX_KEY)
        } else {
            serde_json::to_string(pending)
                .map_err(StorageError::from)
                .and_then(|value| self.storage.set_item(TRANSACTION_INDEX_KEY, &value))
        };
        if let Err(err) = written {
            warn!(error = %err, "Failed to write transaction index");
        }
    }
}

impl fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionStore").field("storage", &"DurableStorage").finish()
    }
}

fn storage_key(state: &str) -> String {
    format!("{TRANSACTION_KEY_PREFIX}{state}")
}
