//! Configuration loader
//!
//! Loads the session configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment, if one exists
//! 2. Attempts to load from environment variables
//! 3. If a required variable is missing, falls back to a config file
//! 4. Probes multiple paths for config files (JSON or TOML)
//!
//! Whatever the source, the result is validated before it is returned.
//!
//! ## Environment Variables
//! - `OIDC_SESSION_DOMAIN`: Provider tenant host (required)
//! - `OIDC_SESSION_CLIENT_ID`: Client identifier (required)
//! - `OIDC_SESSION_REDIRECT_URI`: Login callback URL (required)
//! - `OIDC_SESSION_LOGOUT_REDIRECT_URI`: Post-logout URL (required)
//! - `OIDC_SESSION_SCOPE`: Requested scope (default `openid`)
//! - `OIDC_SESSION_RESPONSE_TYPE`: must be `token id_token` when set
//! - `OIDC_SESSION_AUDIENCE`: API audience
//! - `OIDC_SESSION_SILENT_TIMEOUT_MS`: Silent check timeout (default 60000)
//! - `OIDC_SESSION_HINT_KEY`: Storage key of the session hint
//! - `OIDC_SESSION_MAX_RENEWAL_FAILURES`: Clear the session after this many
//!   consecutive failed renewals
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./oidc-session.json` or `./oidc-session.toml`
//! 2. `./config.json` or `./config.toml`
//! 3. The same names in the parent and grandparent directories
//! 4. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use oidc_session_domain::{AuthConfig, ResponseType, Result, SessionError};

const ENV_PREFIX: &str = "OIDC_SESSION_";
const CONFIG_FILE_NAMES: [&str; 4] =
    ["oidc-session.json", "oidc-session.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `SessionError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The resulting configuration fails validation
pub fn load() -> Result<AuthConfig> {
    load_dotenv();

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Read `.env` into the process environment; existing variables win
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!(error = %e, "Could not load .env file");
            None
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `SessionError::Config` if a required variable is missing or an
/// optional one has an invalid value.
pub fn load_from_env() -> Result<AuthConfig> {
    let mut config = AuthConfig::new(
        env_var("DOMAIN")?,
        env_var("CLIENT_ID")?,
        env_var("REDIRECT_URI")?,
        env_var("LOGOUT_REDIRECT_URI")?,
    );

    if let Some(scope) = env_opt("SCOPE") {
        config.scope = scope;
    }
    if let Some(response_type) = env_opt("RESPONSE_TYPE") {
        config.response_type = ResponseType::from_str(&response_type).map_err(SessionError::Config)?;
    }
    config.audience = env_opt("AUDIENCE");
    if let Some(timeout) = env_parse::<u64>("SILENT_TIMEOUT_MS")? {
        config.silent_timeout_ms = timeout;
    }
    if let Some(hint_key) = env_opt("HINT_KEY") {
        config.hint_key = hint_key;
    }
    config.renewal.max_consecutive_failures = env_parse::<u32>("MAX_RENEWAL_FAILURES")?;

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `SessionError::Config` if the file is missing, unreadable,
/// malformed or fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<AuthConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SessionError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SessionError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SessionError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content, format chosen by extension
fn parse_config(contents: &str, path: &Path) -> Result<AuthConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SessionError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SessionError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SessionError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a config file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_key(suffix: &str) -> String {
    format!("{ENV_PREFIX}{suffix}")
}

/// Required, non-empty environment variable
fn env_var(suffix: &str) -> Result<String> {
    let key = env_key(suffix);
    env_opt(suffix)
        .ok_or_else(|| SessionError::Config(format!("Missing required environment variable: {key}")))
}

/// Optional environment variable; blank counts as unset
fn env_opt(suffix: &str) -> Option<String> {
    std::env::var(env_key(suffix)).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(suffix: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(suffix)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| {
                SessionError::Config(format!("Invalid {}: {e}", env_key(suffix)))
            })
        })
        .transpose()
}
