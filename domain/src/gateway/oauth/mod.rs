//! OAuth authentication gateway.
//!
//! Re-exports OAuth types from gateway-auth and builds the provider registry
//! from process configuration.

use gateway_auth::http::HttpClientBuilder;
use gateway_auth::providers::ProviderConfig;
use log::*;
use secrecy::SecretString;
use service::config::Config;

use crate::error::Error;

// Re-export OAuth types from gateway-auth
pub use gateway_auth::oauth::{
    token::Tokens, AuthorizationRequest, AuthorizationState, ProfileFetcher, Provider,
    ProviderKind, TokenExchanger, UserInfo,
};
pub use gateway_auth::providers::Registry;

/// Build the provider registry from config.
///
/// A provider is registered only when both its client id and client secret
/// are configured. All providers share one HTTP client carrying the
/// configured timeout.
pub fn registry_from_config(config: &Config) -> Result<Registry, Error> {
    let http_client = HttpClientBuilder::new()
        .with_timeout(config.http_timeout())
        .build()
        .map_err(gateway_auth::Error::from)?;

    let mut configs = Vec::new();
    for kind in ProviderKind::ALL {
        match provider_config(config, kind)? {
            Some(provider_config) => {
                info!(
                    "{} login enabled, redirect URI {}",
                    kind.display_name(),
                    provider_config.redirect_url
                );
                configs.push(provider_config);
            }
            None => warn!(
                "{} login disabled: client id and client secret are not both configured",
                kind.display_name()
            ),
        }
    }

    Ok(Registry::new(configs, http_client))
}

/// Create the configuration for one provider, or `None` if it is not configured.
fn provider_config(config: &Config, kind: ProviderKind) -> Result<Option<ProviderConfig>, Error> {
    let (client_id, client_secret, redirect_uri, scopes, endpoints) = match kind {
        ProviderKind::Google => (
            config.google_client_id(),
            config.google_client_secret(),
            config.google_redirect_uri(),
            &config.google_scopes,
            (
                config.google_auth_url(),
                config.google_token_url(),
                config.google_userinfo_url(),
            ),
        ),
        ProviderKind::Github => (
            config.github_client_id(),
            config.github_client_secret(),
            config.github_redirect_uri(),
            &config.github_scopes,
            (
                config.github_auth_url(),
                config.github_token_url(),
                config.github_userinfo_url(),
            ),
        ),
    };

    let (Some(client_id), Some(client_secret)) = (client_id, client_secret) else {
        return Ok(None);
    };

    let (authorization, token, userinfo) = endpoints;
    let provider_config = ProviderConfig::new(
        kind,
        client_id,
        SecretString::from(client_secret),
        redirect_uri.to_string(),
    )?
    .with_scopes(scopes.clone())
    .with_endpoints(authorization, token, userinfo)?;

    Ok(Some(provider_config))
}
