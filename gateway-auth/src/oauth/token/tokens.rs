//! OAuth token types.

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;
use serde::Deserialize;

use crate::oauth::ProviderKind;

/// OAuth tokens with metadata.
///
/// Tokens remember which provider issued them so they can only be presented
/// back to that provider.
#[derive(Debug, Clone)]
pub struct Tokens {
    /// Provider that issued these tokens.
    pub provider: ProviderKind,
    /// Access token for API requests.
    pub access_token: SecretString,
    /// Refresh token, when the provider issues one.
    pub refresh_token: Option<SecretString>,
    /// When the access token expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// Token type (usually "Bearer").
    pub token_type: String,
    /// Granted scopes.
    pub scopes: Vec<String>,
}

/// Successful token endpoint body (RFC 6749 §5.1).
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Error body returned by a token endpoint (RFC 6749 §5.2).
///
/// GitHub sends these with a 200 status.
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Either shape a token endpoint may answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TokenEndpointResponse {
    Success(TokenResponse),
    Error(TokenErrorResponse),
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl TokenResponse {
    /// Convert the wire response into [`Tokens`] owned by `provider`.
    pub fn into_tokens(self, provider: ProviderKind) -> Tokens {
        let expires_at = self
            .expires_in
            .filter(|secs| *secs > 0)
            .map(|secs| Utc::now() + Duration::seconds(secs));

        // Google delimits scopes with spaces, GitHub with commas.
        let scopes = self
            .scope
            .map(|scope| {
                scope
                    .split([' ', ','])
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Tokens {
            provider,
            access_token: SecretString::from(self.access_token),
            refresh_token: self.refresh_token.map(SecretString::from),
            expires_at,
            token_type: self.token_type,
            scopes,
        }
    }
}
