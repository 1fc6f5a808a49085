//! Session lifecycle: ports, persisted hint, error classification and the
//! manager tying them together.

pub mod classifier;
pub mod hint;
pub mod manager;
pub mod ports;

pub use classifier::ErrorClassifier;
pub use hint::PersistedSessionHint;
pub use manager::SessionManager;
