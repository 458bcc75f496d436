//! Static per-provider OAuth settings.

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{config_error, ConfigErrorKind, Error};
use crate::oauth::ProviderKind;

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

pub const GITHUB_AUTH_URL: &str = "https://github.com/login/oauth/authorize";
pub const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
pub const GITHUB_USERINFO_URL: &str = "https://api.github.com/user";

/// Provider configuration with credentials and endpoints.
///
/// Built once at start-up and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider identifier.
    pub kind: ProviderKind,
    pub client_id: String,
    pub client_secret: SecretString,
    /// Callback URL registered with the provider. Sent verbatim on both the
    /// authorization request and the code exchange.
    pub redirect_url: String,
    pub scopes: Vec<String>,
    pub authorization_endpoint: Url,
    pub token_endpoint: Url,
    pub userinfo_endpoint: Url,
}

impl ProviderConfig {
    /// Create a configuration for `kind` using the provider's public endpoints
    /// and default scopes.
    pub fn new(
        kind: ProviderKind,
        client_id: String,
        client_secret: SecretString,
        redirect_url: String,
    ) -> Result<Self, Error> {
        if client_id.trim().is_empty() || client_secret.expose_secret().trim().is_empty() {
            return Err(config_error(
                ConfigErrorKind::MissingCredentials,
                &format!("{kind} client id and client secret are required"),
            ));
        }

        let (authorization, token, userinfo) = default_endpoints(kind);

        Ok(Self {
            kind,
            client_id,
            client_secret,
            redirect_url,
            scopes: default_scopes(kind),
            authorization_endpoint: Url::parse(authorization)?,
            token_endpoint: Url::parse(token)?,
            userinfo_endpoint: Url::parse(userinfo)?,
        })
    }

    /// Replace the requested scopes. An empty list keeps the defaults.
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        let scopes: Vec<String> = scopes
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !scopes.is_empty() {
            self.scopes = scopes;
        }
        self
    }

    /// Override the provider endpoints, e.g. to point at a staging or mock server.
    pub fn with_endpoints(
        mut self,
        authorization: &str,
        token: &str,
        userinfo: &str,
    ) -> Result<Self, Error> {
        self.authorization_endpoint = Url::parse(authorization)?;
        self.token_endpoint = Url::parse(token)?;
        self.userinfo_endpoint = Url::parse(userinfo)?;
        Ok(self)
    }
}

/// Get Google configuration with public endpoints.
pub fn google_config(
    client_id: String,
    client_secret: SecretString,
    redirect_url: String,
) -> Result<ProviderConfig, Error> {
    ProviderConfig::new(ProviderKind::Google, client_id, client_secret, redirect_url)
}

/// Get GitHub configuration with public endpoints.
pub fn github_config(
    client_id: String,
    client_secret: SecretString,
    redirect_url: String,
) -> Result<ProviderConfig, Error> {
    ProviderConfig::new(ProviderKind::Github, client_id, client_secret, redirect_url)
}

/// Public (authorization, token, user-info) endpoints for a provider.
pub fn default_endpoints(kind: ProviderKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        ProviderKind::Google => (GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL, GOOGLE_USERINFO_URL),
        ProviderKind::Github => (GITHUB_AUTH_URL, GITHUB_TOKEN_URL, GITHUB_USERINFO_URL),
    }
}

/// Scopes requested when none are configured.
pub fn default_scopes(kind: ProviderKind) -> Vec<String> {
    let scopes: &[&str] = match kind {
        ProviderKind::Google => &["profile", "email"],
        ProviderKind::Github => &["user:email"],
    };
    scopes.iter().map(|s| s.to_string()).collect()
}
