//! Redirect fragment parsing
//!
//! Splits `#access_token=...&id_token=...&state=...` into typed fields. No
//! validation beyond `expires_in` happens here; see the transport for the
//! `state`/`nonce` checks.

use oidc_session_domain::ProviderError;
use url::form_urlencoded;

/// Raw fields of an implicit-flow response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentResponse {
    pub access_token: Option<String>,
    pub id_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub state: Option<String>,
    pub error: Option<ProviderError>,
}

impl FragmentResponse {
    /// No recognised parameter was present
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Parse a fragment, with or without its leading `#`
///
/// Unknown parameters are ignored and empty values count as absent.
///
/// # Errors
///
/// Returns an `invalid_token` provider error when `expires_in` is present but
/// not an integer.
pub fn parse_fragment(fragment: &str) -> Result<FragmentResponse, ProviderError> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut response = FragmentResponse::default();
    let mut error_code = None;
    let mut error_description = None;

    for (key, value) in form_urlencoded::parse(fragment.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        let value = value.into_owned();
        match key.as_ref() {
            "access_token" => response.access_token = Some(value),
            "id_token" => response.id_token = Some(value),
            "token_type" => response.token_type = Some(value),
            "scope" => response.scope = Some(value),
            "state" => response.state = Some(value),
            "error" => error_code = Some(value),
            "error_description" => error_description = Some(value),
            "expires_in" => {
                let seconds = value.trim().parse::<i64>().map_err(|_| {
                    ProviderError::invalid_token(format!("expires_in is not a number: {value}"))
                })?;
                response.expires_in = Some(seconds);
            }
            _ => {}
        }
    }

    if let Some(code) = error_code {
        response.error = Some(ProviderError { code, description: error_description });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_fragment() {
        let parsed = parse_fragment(
            "#access_token=at&id_token=it&expires_in=7200&token_type=Bearer&scope=openid%20email&state=s1",
        )
        .unwrap();

        assert_eq!(parsed.access_token.as_deref(), Some("at"));
        assert_eq!(parsed.id_token.as_deref(), Some("it"));
        assert_eq!(parsed.expires_in, Some(7200));
        assert_eq!(parsed.token_type.as_deref(), Some("Bearer"));
        assert_eq!(parsed.scope.as_deref(), Some("openid email"));
        assert_eq!(parsed.state.as_deref(), Some("s1"));
        assert!(parsed.error.is_none());
    }

    #[test]
    fn parses_error_fragment() {
        let parsed =
            parse_fragment("error=login_required&error_description=Login+required&state=s2").unwrap();

        let error = parsed.error.unwrap();
        assert_eq!(error.code, "login_required");
        assert_eq!(error.description.as_deref(), Some("Login required"));
        assert_eq!(parsed.state.as_deref(), Some("s2"));
    }

    #[test]
    fn empty_and_unrelated_fragments_are_empty() {
        assert!(parse_fragment("").unwrap().is_empty());
        assert!(parse_fragment("#").unwrap().is_empty());
        assert!(parse_fragment("#/dashboard").unwrap().is_empty());
        assert!(parse_fragment("access_token=&utm_source=x").unwrap().is_empty());
    }

    #[test]
    fn non_numeric_expiry_is_invalid_token() {
        let err = parse_fragment("access_token=a&expires_in=soon").unwrap_err();
        assert_eq!(err.code, "invalid_token");
    }
}
