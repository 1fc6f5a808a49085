//! ID token claims decoding
//!
//! The payload segment is base64url-decoded and parsed as a JSON object.
//! Signatures are NOT verified; claims are display data only.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use oidc_session_domain::{Claims, ProviderError};

/// Decode the claims of a compact JWS (`header.payload.signature`)
///
/// # Errors
///
/// Returns an `invalid_token` provider error when the token does not have
/// three segments or its payload is not a base64url JSON object.
pub fn decode_claims(id_token: &str) -> Result<Claims, ProviderError> {
    let mut segments = id_token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(ProviderError::invalid_token("ID token is not a valid JWT")),
    };

    // Some providers pad the payload despite RFC 7515
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ProviderError::invalid_token(format!("ID token payload is not base64url: {e}")))?;

    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(serde_json::Value::Object(claims)) => Ok(claims),
        Ok(_) => Err(ProviderError::invalid_token("ID token payload is not a JSON object")),
        Err(e) => Err(ProviderError::invalid_token(format!("ID token payload is not JSON: {e}"))),
    }
}

/// Build an unsigned token carrying `claims`, for tests and fixtures
pub fn encode_unsigned(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.")
}
