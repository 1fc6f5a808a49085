//! # oidc-session Core
//!
//! Session lifecycle logic - no browser or storage code.
//!
//! This crate contains:
//! - Port interfaces (traits) for the identity transport, navigation and
//!   durable storage
//! - The persisted session hint and the provider error classifier
//! - `SessionManager`, which orchestrates them
//!
//! ## Architecture Principles
//! - Only depends on `oidc-session-common` and `oidc-session-domain`
//! - All external capabilities via traits
//! - Time comes from an injected `Clock`

pub mod session;

pub use session::ports::{DurableStorage, IdentityTransport, RedirectNavigator};
pub use session::{ErrorClassifier, PersistedSessionHint, SessionManager};
