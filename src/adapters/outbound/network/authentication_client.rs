use crate::config::ClientConfig;
use crate::shared::error::CatalogError;
use crate::shared::Result;
use serde::Deserialize;
use std::fmt;

const TOKEN_PATH: &str = "/token";
const GRANT_TYPE_PASSWORD: &str = "password";

/// Bearer token sent with every catalog request
///
/// `Debug` never prints the token value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// AuthenticationClient obtaining bearer tokens from the authorization server
///
/// Uses the OAuth2 password grant: user credentials in the form body,
/// client credentials as HTTP basic auth.
pub struct AuthenticationClient {
    client: reqwest::Client,
    token_url: String,
}

impl AuthenticationClient {
    /// Creates a client for the authorization server configured in `config`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = super::http_client_builder(config)?.build()?;
        let auth_url = config.auth_url.as_deref().unwrap_or_default();
        Ok(Self {
            client,
            token_url: token_url(auth_url),
        })
    }

    /// Returns the configured token, or requests a new one from `/token`
    ///
    /// # Errors
    /// Returns `CatalogError::Authentication` if the request fails, the server
    /// rejects the credentials or the response has no `access_token`
    pub async fn fetch_access_token(&self, config: &ClientConfig) -> Result<AccessToken> {
        if let Some(token) = config.configured_token() {
            return Ok(AccessToken::new(token));
        }

        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        let form = [
            ("grant_type", GRANT_TYPE_PASSWORD.to_string()),
            ("username", field(&config.user)),
            ("password", field(&config.password)),
        ];

        tracing::debug!(endpoint = %self.token_url, "Requesting access token");
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(field(&config.client_id), config.client_password.as_ref())
            .form(&form)
            .send()
            .await
            .map_err(|e| self.authentication_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.authentication_error(format!("status {}", status)).into());
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| self.authentication_error(format!("invalid token response: {}", e)))?;

        if token.access_token.trim().is_empty() {
            return Err(self.authentication_error("empty access_token".to_string()).into());
        }

        Ok(AccessToken::new(token.access_token))
    }

    fn authentication_error(&self, details: String) -> CatalogError {
        CatalogError::Authentication {
            endpoint: self.token_url.clone(),
            details,
        }
    }
}

fn token_url(auth_url: &str) -> String {
    format!("{}{}", auth_url.trim_end_matches('/'), TOKEN_PATH)
}
