//! Provider-agnostic OAuth 2.0 transport.
//!
//! Builds authorization URLs, performs the authorization-code exchange and
//! fetches raw user-info bodies. Every request is a single attempt.

use log::*;
use reqwest::header::ACCEPT;
use secrecy::ExposeSecret;
use serde::Serialize;

use super::state::AuthorizationState;
use super::token::{TokenEndpointResponse, Tokens};
use super::AuthorizationRequest;
use crate::error::{oauth_error, oauth_error_from, Error, OAuthErrorKind};
use crate::providers::ProviderConfig;

/// Form body for the authorization-code exchange.
#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
    grant_type: &'static str,
    code: &'a str,
    redirect_uri: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// OAuth client bound to a single provider configuration.
pub struct OAuthClient {
    config: ProviderConfig,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Create a client for `config` sharing `http_client` with other providers.
    pub fn new(config: ProviderConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Generate the OAuth authorization URL for user consent.
    pub fn authorization_url(&self, state: &AuthorizationState) -> AuthorizationRequest {
        let mut url = self.config.authorization_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("state", state.as_str());

        AuthorizationRequest {
            url: url.into(),
            state: state.clone(),
        }
    }

    /// Exchange an authorization code for tokens.
    ///
    /// Any transport error, non-2xx status, OAuth error body or malformed
    /// payload fails with `TokenExchangeFailed`.
    pub async fn exchange_code(&self, code: &str) -> Result<Tokens, Error> {
        let provider = self.config.kind;
        let request = TokenExchangeRequest {
            grant_type: "authorization_code",
            code,
            redirect_uri: &self.config.redirect_url,
            client_id: &self.config.client_id,
            client_secret: self.config.client_secret.expose_secret(),
        };

        debug!("Exchanging {} OAuth code for tokens", provider);

        let response = self
            .http_client
            .post(self.config.token_endpoint.clone())
            .header(ACCEPT, "application/json")
            .form(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach {} token endpoint: {:?}", provider, e);
                oauth_error_from(OAuthErrorKind::TokenExchangeFailed, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("{} token endpoint returned {}: {}", provider, status, error_text);
            return Err(oauth_error(
                OAuthErrorKind::TokenExchangeFailed,
                &format!("token endpoint returned {status}"),
            ));
        }

        let body: TokenEndpointResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse {} token response: {:?}", provider, e);
            oauth_error_from(OAuthErrorKind::TokenExchangeFailed, e)
        })?;

        match body {
            TokenEndpointResponse::Success(tokens) if tokens.access_token.trim().is_empty() => {
                warn!("{} token response carried an empty access_token", provider);
                Err(oauth_error(
                    OAuthErrorKind::TokenExchangeFailed,
                    "token endpoint returned an empty access_token",
                ))
            }
            TokenEndpointResponse::Success(tokens) => {
                info!("Successfully exchanged {} OAuth code for tokens", provider);
                Ok(tokens.into_tokens(provider))
            }
            TokenEndpointResponse::Error(err) => {
                warn!(
                    "{} rejected the authorization code: {} {}",
                    provider,
                    err.error,
                    err.error_description.as_deref().unwrap_or_default()
                );
                Err(oauth_error(
                    OAuthErrorKind::TokenExchangeFailed,
                    &format!("token endpoint error: {}", err.error),
                ))
            }
        }
    }

    /// Fetch the raw user-info body using the access token as bearer credential.
    pub async fn fetch_profile_body(&self, tokens: &Tokens) -> Result<Vec<u8>, Error> {
        let provider = self.config.kind;

        let response = self
            .http_client
            .get(self.config.userinfo_endpoint.clone())
            .bearer_auth(tokens.access_token.expose_secret())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to get {} user info: {:?}", provider, e);
                oauth_error_from(OAuthErrorKind::ProfileFetchFailed, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("{} user info error {}: {}", provider, status, error_text);
            return Err(oauth_error(
                OAuthErrorKind::ProfileFetchFailed,
                &format!("user-info endpoint returned {status}"),
            ));
        }

        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read {} user info body: {:?}", provider, e);
            oauth_error_from(OAuthErrorKind::ProfileFetchFailed, e)
        })?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::oauth::ProviderKind;
    use crate::providers::google_config;
    use mockito::{Matcher, Server};
    use secrecy::SecretString;
    use url::Url;

    fn client_for(server_url: &str) -> OAuthClient {
        let config = google_config(
            "client-123".to_string(),
            SecretString::from("secret-456".to_string()),
            "http://localhost:8000/auth/google/callback".to_string(),
        )
        .unwrap()
        .with_endpoints(
            &format!("{server_url}/auth"),
            &format!("{server_url}/token"),
            &format!("{server_url}/userinfo"),
        )
        .unwrap();

        OAuthClient::new(config, reqwest::Client::new())
    }

    fn tokens(provider: ProviderKind) -> Tokens {
        Tokens {
            provider,
            access_token: SecretString::from("access-abc".to_string()),
            refresh_token: None,
            expires_at: None,
            token_type: "Bearer".to_string(),
            scopes: vec![],
        }
    }

    fn assert_oauth_kind(err: &Error, kind: OAuthErrorKind) {
        assert_eq!(err.error_kind, ErrorKind::OAuth(kind));
    }

    #[test]
    fn test_authorization_url_parameters() {
        let client = client_for("https://accounts.example.com");
        let request =
            client.authorization_url(&AuthorizationState::for_provider(ProviderKind::Google));

        let url = Url::parse(&request.url).unwrap();
        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert_eq!(url.path(), "/auth");
        assert_eq!(params["client_id"], "client-123");
        assert_eq!(
            params["redirect_uri"],
            "http://localhost:8000/auth/google/callback"
        );
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["scope"], "profile email");
        assert_eq!(params["state"], "google");
        assert_eq!(request.state.as_str(), "google");
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_header("accept", "application/json")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("code".into(), "code-xyz".into()),
                Matcher::UrlEncoded(
                    "redirect_uri".into(),
                    "http://localhost:8000/auth/google/callback".into(),
                ),
                Matcher::UrlEncoded("client_id".into(), "client-123".into()),
                Matcher::UrlEncoded("client_secret".into(), "secret-456".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"access-abc","token_type":"Bearer","expires_in":3600}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let tokens = client.exchange_code("code-xyz").await.unwrap();

        mock.assert_async().await;
        assert_eq!(tokens.provider, ProviderKind::Google);
        assert_eq!(tokens.access_token.expose_secret(), "access-abc");
        assert!(tokens.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_exchange_code_non_success_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error":"invalid_grant"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.exchange_code("stale").await.unwrap_err();
        assert_oauth_kind(&err, OAuthErrorKind::TokenExchangeFailed);
    }

    #[tokio::test]
    async fn test_exchange_code_error_body_with_ok_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"bad_verification_code","error_description":"The code passed is incorrect or expired."}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.exchange_code("stale").await.unwrap_err();
        assert_oauth_kind(&err, OAuthErrorKind::TokenExchangeFailed);
    }

    #[tokio::test]
    async fn test_exchange_code_malformed_payload() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_body("access_token=abc&token_type=bearer")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.exchange_code("code").await.unwrap_err();
        assert_oauth_kind(&err, OAuthErrorKind::TokenExchangeFailed);
    }

    #[tokio::test]
    async fn test_exchange_code_empty_access_token() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"","token_type":"Bearer"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.exchange_code("code").await.unwrap_err();
        assert_oauth_kind(&err, OAuthErrorKind::TokenExchangeFailed);
    }

    #[tokio::test]
    async fn test_exchange_code_transport_error() {
        // Nothing listens on port 9 (discard) on test hosts.
        let client = client_for("http://127.0.0.1:9");
        let err = client.exchange_code("code").await.unwrap_err();
        assert_oauth_kind(&err, OAuthErrorKind::TokenExchangeFailed);
    }

    #[tokio::test]
    async fn test_fetch_profile_body_sends_bearer_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/userinfo")
            .match_header("authorization", "Bearer access-abc")
            .with_status(200)
            .with_body(r#"{"sub":"1"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let body = client
            .fetch_profile_body(&tokens(ProviderKind::Google))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, br#"{"sub":"1"}"#.to_vec());
    }

    #[tokio::test]
    async fn test_fetch_profile_body_unauthorized() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/userinfo")
            .with_status(401)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .fetch_profile_body(&tokens(ProviderKind::Google))
            .await
            .unwrap_err();
        assert_oauth_kind(&err, OAuthErrorKind::ProfileFetchFailed);
    }
}
