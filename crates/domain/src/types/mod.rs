//! Domain types and models

pub mod auth;
pub mod category;
pub mod session;

pub use auth::{AuthResult, Claims, ProviderError};
pub use category::ErrorCategory;
pub use session::{RenewalOutcome, SessionState, SessionTokens};
