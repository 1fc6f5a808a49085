//! Provider error code classification

use std::collections::HashMap;

use oidc_session_domain::constants::{
    ACCOUNT_SELECTION_REQUIRED, CONSENT_REQUIRED, INTERACTION_REQUIRED, LOGIN_REQUIRED,
};
use oidc_session_domain::{ErrorCategory, ProviderError};

/// Maps provider error codes onto [`ErrorCategory`]
///
/// Unknown codes fall back to [`ErrorCategory::Transient`]; classification
/// never fails.
#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    codes: HashMap<String, ErrorCategory>,
}

impl ErrorClassifier {
    pub fn new() -> Self {
        let codes = [
            (LOGIN_REQUIRED, ErrorCategory::InteractionRequired),
            (INTERACTION_REQUIRED, ErrorCategory::InteractionRequired),
            (ACCOUNT_SELECTION_REQUIRED, ErrorCategory::InteractionRequired),
            (CONSENT_REQUIRED, ErrorCategory::ConsentRequired),
        ]
        .into_iter()
        .map(|(code, category)| (code.to_string(), category))
        .collect();

        Self { codes }
    }

    /// Register (or override) a provider-specific code
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>, category: ErrorCategory) -> Self {
        self.codes.insert(code.into(), category);
        self
    }

    pub fn classify_code(&self, code: &str) -> ErrorCategory {
        self.codes.get(code).copied().unwrap_or(ErrorCategory::Transient)
    }

    pub fn classify(&self, error: &ProviderError) -> ErrorCategory {
        self.classify_code(&error.code)
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
