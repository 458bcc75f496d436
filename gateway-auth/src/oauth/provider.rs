//! OAuth provider trait and types.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::OAuthClient;
use super::state::AuthorizationState;
use super::token::Tokens;
use crate::error::{oauth_error, Error, OAuthErrorKind};
use crate::providers::ProviderConfig;

/// Identity providers the gateway can log users in with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Google,
    Github,
}

impl ProviderKind {
    /// Every supported provider, in display order.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Google, ProviderKind::Github];

    /// Get the provider identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::Github => "github",
        }
    }

    /// Human readable provider name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Google => "Google",
            ProviderKind::Github => "GitHub",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "google" => Ok(ProviderKind::Google),
            "github" => Ok(ProviderKind::Github),
            _ => Err(oauth_error(
                OAuthErrorKind::UnknownProvider,
                &format!("unsupported provider identifier: {value}"),
            )),
        }
    }
}

/// Authorization request with the URL to redirect the browser to.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Authorization URL to redirect the user to.
    pub url: String,
    /// State parameter carried in the URL.
    pub state: AuthorizationState,
}

/// Normalized user profile, independent of the provider it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Provider's unique user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address, when the provider discloses one.
    pub email: Option<String>,
}

/// Trait for OAuth 2.0 providers.
///
/// Transport is shared through [`OAuthClient`]; implementations only decide
/// how their raw profile body maps onto [`UserInfo`].
#[async_trait]
pub trait Provider: Send + Sync {
    /// Shared OAuth transport configured for this provider.
    fn client(&self) -> &OAuthClient;

    /// Map the provider's raw user-info body to the normalized shape.
    ///
    /// Fails with `ProfileFetchFailed` when `id` or `name` are missing.
    fn parse_profile(&self, body: &[u8]) -> Result<UserInfo, Error>;

    /// Get the provider kind.
    fn kind(&self) -> ProviderKind {
        self.config().kind
    }

    /// Static configuration of this provider.
    fn config(&self) -> &ProviderConfig {
        self.client().config()
    }

    /// Generate the authorization URL the browser is redirected to.
    fn authorization_url(&self, state: &AuthorizationState) -> AuthorizationRequest {
        self.client().authorization_url(state)
    }

    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<Tokens, Error> {
        self.client().exchange_code(code).await
    }

    /// Get user information with tokens this provider issued.
    async fn get_user_info(&self, tokens: &Tokens) -> Result<UserInfo, Error> {
        if tokens.provider != self.kind() {
            return Err(oauth_error(
                OAuthErrorKind::ProviderMismatch,
                &format!(
                    "tokens issued by {} presented to {}",
                    tokens.provider,
                    self.kind()
                ),
            ));
        }

        let body = self.client().fetch_profile_body(tokens).await?;
        self.parse_profile(&body)
    }
}

/// Performs the code→token exchange for a provider.
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    async fn exchange(&self, provider: ProviderKind, code: &str) -> Result<Tokens, Error>;
}

/// Fetches and normalizes the user profile for a provider.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch_profile(
        &self,
        provider: ProviderKind,
        tokens: &Tokens,
    ) -> Result<UserInfo, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_round_trips_through_str() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_provider_identifier() {
        let err = "gitlab".parse::<ProviderKind>().unwrap_err();
        assert_eq!(err.oauth_kind(), Some(&OAuthErrorKind::UnknownProvider));
    }

    #[test]
    fn test_provider_identifier_is_case_sensitive() {
        assert!("Google".parse::<ProviderKind>().is_err());
    }
}
