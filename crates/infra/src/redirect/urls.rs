//! Provider URL construction

use oidc_session_domain::AuthConfig;

use super::transaction::Transaction;

/// `prompt` value for non-interactive authorize requests
pub const PROMPT_NONE: &str = "none";

/// Build the authorize URL for `transaction`
///
/// Parameter order is stable: `response_type`, `client_id`, `redirect_uri`,
/// `scope`, `state`, `nonce`, then `audience` and `prompt` when present.
pub fn authorize_url(config: &AuthConfig, transaction: &Transaction, prompt: Option<&str>) -> String {
    let mut params = vec![
        ("response_type", config.response_type.to_string()),
        ("client_id", config.client_id.clone()),
        ("redirect_uri", config.redirect_uri.clone()),
        ("scope", config.scope.clone()),
        ("state", transaction.state.clone()),
        ("nonce", transaction.nonce.clone()),
    ];

    if let Some(audience) = &config.audience {
        params.push(("audience", audience.clone()));
    }
    if let Some(prompt) = prompt {
        params.push(("prompt", prompt.to_string()));
    }

    format!("{}?{}", config.authorize_endpoint(), encode_query(&params))
}

/// Build the provider logout URL
pub fn logout_url(config: &AuthConfig) -> String {
    let params = [
        ("returnTo", config.logout_redirect_uri.clone()),
        ("client_id", config.client_id.clone()),
    ];
    format!("{}?{}", config.logout_endpoint(), encode_query(&params))
}

fn encode_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
