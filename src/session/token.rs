use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::utils::constants::{GRANT_AUTHORIZATION_CODE, GRANT_REFRESH_TOKEN, UNKNOWN_LOGIN_ERROR};

/// The only token-endpoint fields a session trusts; anything else the
/// server sends is dropped during deserialization.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct LoginFailure {
    error_description: Option<String>,
}

/// Form payload for one exchange with the authorization endpoint.
#[derive(Debug, Clone)]
pub enum Grant<'a> {
    AuthorizationCode {
        client_id: &'a str,
        redirect_uri: &'a str,
        code: &'a str,
    },
    RefreshToken {
        client_id: &'a str,
        refresh_token: &'a str,
    },
}

impl<'a> Grant<'a> {
    pub fn grant_type(&self) -> &'static str {
        match self {
            Grant::AuthorizationCode { .. } => GRANT_AUTHORIZATION_CODE,
            Grant::RefreshToken { .. } => GRANT_REFRESH_TOKEN,
        }
    }

    pub fn form(&self) -> Vec<(&'static str, &'a str)> {
        match *self {
            Grant::AuthorizationCode {
                client_id,
                redirect_uri,
                code,
            } => vec![
                ("grant_type", GRANT_AUTHORIZATION_CODE),
                ("client_id", client_id),
                ("redirect_uri", redirect_uri),
                ("code", code),
            ],
            Grant::RefreshToken {
                client_id,
                refresh_token,
            } => vec![
                ("grant_type", GRANT_REFRESH_TOKEN),
                ("client_id", client_id),
                ("refresh_token", refresh_token),
            ],
        }
    }
}

/// POST `grant` to the authorization endpoint and return the pruned token response.
///
/// Any non-2xx status is a [`Error::Login`] carrying the server's
/// `error_description`, or `Unknown Error` when none is given.
pub async fn call_login_server(client: &Client, endpoint: &str, grant: &Grant<'_>) -> Result<TokenResponse> {
    debug!("token exchange: grant_type={} endpoint={}", grant.grant_type(), endpoint);

    let response = client.post(endpoint).form(&grant.form()).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let description = serde_json::from_str::<LoginFailure>(&body)
            .ok()
            .and_then(|failure| failure.error_description)
            .unwrap_or_else(|| UNKNOWN_LOGIN_ERROR.to_owned());
        warn!("token exchange rejected: status={} grant_type={}", status, grant.grant_type());
        return Err(Error::Login(description));
    }

    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|e| Error::InvalidTokenResponse(e.to_string()))?;
    if token.expires_in <= 0 {
        return Err(Error::InvalidTokenResponse(format!(
            "expires_in must be positive, got {}",
            token.expires_in
        )));
    }
    Ok(token)
}
