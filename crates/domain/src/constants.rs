//! Domain constants
//!
//! Defaults for [`crate::AuthConfig`], well-known provider error codes and the
//! storage keys shared by the hint and the redirect transport.

// Configuration defaults
pub const DEFAULT_SCOPE: &str = "openid";
pub const DEFAULT_HINT_KEY: &str = "isLoggedIn";
pub const DEFAULT_SILENT_TIMEOUT_MS: u64 = 60_000;

// Persisted hint values
pub const HINT_TRUE_VALUE: &str = "true";
pub const RENEWAL_FAILURES_SUFFIX: &str = ".renewalFailures";

// Redirect transaction storage
pub const TRANSACTION_KEY_PREFIX: &str = "oidc-session.tx.";
/// JSON array of the `state` values with a stored transaction
pub const TRANSACTION_INDEX_KEY: &str = "oidc-session.txIndex";
/// Transactions older than this are rejected and purged (one hour)
pub const TRANSACTION_TTL_MS: i64 = 3_600_000;

// Provider endpoints, relative to the tenant domain
pub const AUTHORIZE_PATH: &str = "/authorize";
pub const LOGOUT_PATH: &str = "/v2/logout";

// Provider error codes (OIDC Core §3.1.2.6 plus transport-level codes)
pub const LOGIN_REQUIRED: &str = "login_required";
pub const INTERACTION_REQUIRED: &str = "interaction_required";
pub const ACCOUNT_SELECTION_REQUIRED: &str = "account_selection_required";
pub const CONSENT_REQUIRED: &str = "consent_required";
pub const INVALID_TOKEN: &str = "invalid_token";
pub const TIMEOUT: &str = "timeout";
pub const FRAME_ERROR: &str = "frame_error";

/// Message attached to results that arrive without both tokens.
pub const MALFORMED_RESULT_MESSAGE: &str = "unknown error";
