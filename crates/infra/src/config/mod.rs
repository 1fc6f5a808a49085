//! Configuration loading
//!
//! Builds an [`oidc_session_domain::AuthConfig`] from environment variables
//! (optionally seeded from a `.env` file) or from a JSON/TOML file.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_dotenv, load_from_env, load_from_file, probe_config_paths};
