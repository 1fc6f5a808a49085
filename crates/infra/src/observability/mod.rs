//! Tracing subscriber setup
//!
//! Filter priority:
//! 1. `RUST_LOG`
//! 2. the `default_filter` passed by the host application
//!
//! Session code logs through `tracing` only; installing a subscriber is the
//! host's choice, and this module is the convenient default.

use std::str::FromStr;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str =
    "oidc_session_core=info,oidc_session_infra=info,oidc_session_domain=warn";

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single line per event
    #[default]
    Compact,
    /// One JSON object per event, for log shippers
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" | "pretty" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown log format: {other}"),
        }
    }
}

/// Build the env filter from `RUST_LOG`, falling back to `default_filter`
///
/// # Errors
///
/// Fails when `RUST_LOG` is unset and `default_filter` does not parse.
pub fn build_filter(default_filter: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid log filter: {default_filter}")),
    }
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Fails on an invalid filter or when a global subscriber is already set.
pub fn init_tracing(format: LogFormat, default_filter: &str) -> Result<()> {
    let filter = build_filter(default_filter)?;
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().with_target(true).compact())
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().with_target(true).json())
            .try_init(),
    }
    .context("failed to install tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn init_twice_fails_the_second_time() {
        let first = init_tracing(LogFormat::Compact, DEFAULT_FILTER);
        let second = init_tracing(LogFormat::Json, DEFAULT_FILTER);
        // another test binary thread may have won the race for the first call
        assert!(second.is_err());
        let _ = first;
    }
}
