//! Semantic categories for provider errors during silent renewal

use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;

/// Closed set of outcomes a renewal failure is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The user has no active session at the provider
    InteractionRequired,
    /// The user must grant consent interactively
    ConsentRequired,
    /// Anything else; worth retrying on a later page load
    Transient,
}

impl_domain_enum_conversions!(ErrorCategory {
    InteractionRequired => "interaction_required",
    ConsentRequired => "consent_required",
    Transient => "transient",
});

impl ErrorCategory {
    /// Whether the UI should offer an interactive login
    #[must_use]
    pub const fn requires_login(self) -> bool {
        matches!(self, Self::InteractionRequired | Self::ConsentRequired)
    }
}
