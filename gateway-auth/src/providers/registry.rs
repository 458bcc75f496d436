//! Registry of configured providers.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::*;

use super::ProviderConfig;
use crate::error::{oauth_error, Error, OAuthErrorKind};
use crate::oauth::providers::{github, google};
use crate::oauth::token::Tokens;
use crate::oauth::{OAuthClient, ProfileFetcher, Provider, ProviderKind, TokenExchanger, UserInfo};

/// Read-only map from provider identifier to provider implementation.
///
/// Built once at start-up and shared behind an `Arc` by every request; it
/// holds no mutable state.
#[derive(Clone, Default)]
pub struct Registry {
    providers: BTreeMap<ProviderKind, Arc<dyn Provider>>,
}

impl Registry {
    /// Build a registry from provider configurations.
    ///
    /// All providers share `http_client`, which carries the request timeout.
    pub fn new(configs: Vec<ProviderConfig>, http_client: reqwest::Client) -> Self {
        let providers = configs.into_iter().map(|config| {
            let client = OAuthClient::new(config, http_client.clone());
            let provider: Arc<dyn Provider> = match client.config().kind {
                ProviderKind::Google => Arc::new(google::Provider::new(client)),
                ProviderKind::Github => Arc::new(github::Provider::new(client)),
            };
            provider
        });

        Self::from_providers(providers)
    }

    /// Build a registry from already constructed providers.
    pub fn from_providers<I>(providers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Provider>>,
    {
        let mut map = BTreeMap::new();
        for provider in providers {
            let kind = provider.kind();
            if map.insert(kind, provider).is_some() {
                warn!("Provider {} configured more than once, keeping the last", kind);
            }
        }

        Self { providers: map }
    }

    /// Look up a configured provider.
    pub fn lookup(&self, kind: ProviderKind) -> Result<Arc<dyn Provider>, Error> {
        self.providers.get(&kind).cloned().ok_or_else(|| {
            oauth_error(
                OAuthErrorKind::UnknownProvider,
                &format!("provider {kind} is not configured"),
            )
        })
    }

    /// Look up a configured provider by its identifier string.
    pub fn lookup_str(&self, id: &str) -> Result<Arc<dyn Provider>, Error> {
        self.lookup(id.parse()?)
    }

    /// Configured provider kinds in stable order.
    pub fn providers(&self) -> Vec<ProviderKind> {
        self.providers.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[async_trait]
impl TokenExchanger for Registry {
    async fn exchange(&self, provider: ProviderKind, code: &str) -> Result<Tokens, Error> {
        self.lookup(provider)?.exchange_code(code).await
    }
}

#[async_trait]
impl ProfileFetcher for Registry {
    async fn fetch_profile(
        &self,
        provider: ProviderKind,
        tokens: &Tokens,
    ) -> Result<UserInfo, Error> {
        self.lookup(provider)?.get_user_info(tokens).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpClientBuilder;
    use crate::providers::{github_config, google_config};
    use mockito::{Server, ServerGuard};
    use secrecy::SecretString;

    fn google(server: &ServerGuard) -> ProviderConfig {
        let base = server.url();
        google_config(
            "google-id".to_string(),
            SecretString::from("google-secret".to_string()),
            "http://localhost:8000/auth/google/callback".to_string(),
        )
        .unwrap()
        .with_endpoints(
            &format!("{base}/google/auth"),
            &format!("{base}/google/token"),
            &format!("{base}/google/userinfo"),
        )
        .unwrap()
    }

    fn github(server: &ServerGuard) -> ProviderConfig {
        let base = server.url();
        github_config(
            "github-id".to_string(),
            SecretString::from("github-secret".to_string()),
            "http://localhost:8000/auth/github/callback".to_string(),
        )
        .unwrap()
        .with_endpoints(
            &format!("{base}/github/auth"),
            &format!("{base}/github/token"),
            &format!("{base}/github/user"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_configured_providers() {
        let server = Server::new_async().await;
        let registry = Registry::new(vec![github(&server), google(&server)], reqwest::Client::new());

        assert_eq!(
            registry.providers(),
            vec![ProviderKind::Google, ProviderKind::Github]
        );
        assert_eq!(
            registry.lookup(ProviderKind::Github).unwrap().kind(),
            ProviderKind::Github
        );
        assert_eq!(
            registry.lookup_str("google").unwrap().kind(),
            ProviderKind::Google
        );
    }

    #[tokio::test]
    async fn test_lookup_unconfigured_provider() {
        let server = Server::new_async().await;
        let registry = Registry::new(vec![google(&server)], reqwest::Client::new());

        let err = registry.lookup(ProviderKind::Github).err().unwrap();
        assert_eq!(err.oauth_kind(), Some(&OAuthErrorKind::UnknownProvider));

        let err = registry.lookup_str("twitter").err().unwrap();
        assert_eq!(err.oauth_kind(), Some(&OAuthErrorKind::UnknownProvider));
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::default();
        assert!(registry.is_empty());
        assert!(registry.providers().is_empty());
    }

    #[tokio::test]
    async fn test_github_exchange_and_profile() {
        let mut server = Server::new_async().await;
        let _token = server
            .mock("POST", "/github/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"gho_abc","scope":"user:email","token_type":"bearer"}"#)
            .create_async()
            .await;
        let _user = server
            .mock("GET", "/github/user")
            .match_header("authorization", "Bearer gho_abc")
            .match_header(
                "user-agent",
                mockito::Matcher::Regex("^gateway-auth/".to_string()),
            )
            .with_status(200)
            .with_body(r#"{"id":1,"login":"ada","email":"a@x.com"}"#)
            .create_async()
            .await;

        let http_client = HttpClientBuilder::new().build().unwrap();
        let registry = Registry::new(vec![github(&server)], http_client);
        let tokens = registry.exchange(ProviderKind::Github, "code").await.unwrap();
        let user = registry
            .fetch_profile(ProviderKind::Github, &tokens)
            .await
            .unwrap();

        assert_eq!(user.id, "1");
        assert_eq!(user.name, "ada");
        assert_eq!(user.email.as_deref(), Some("a@x.com"));
    }

    #[tokio::test]
    async fn test_google_exchange_and_profile() {
        let mut server = Server::new_async().await;
        let _token = server
            .mock("POST", "/google/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"ya29","token_type":"Bearer","expires_in":3599}"#)
            .create_async()
            .await;
        let _user = server
            .mock("GET", "/google/userinfo")
            .match_header("authorization", "Bearer ya29")
            .with_status(200)
            .with_body(r#"{"sub":"1","name":"Ada","email":"a@x.com"}"#)
            .create_async()
            .await;

        let registry = Registry::new(vec![google(&server)], reqwest::Client::new());
        let tokens = registry.exchange(ProviderKind::Google, "code").await.unwrap();
        let user = registry
            .fetch_profile(ProviderKind::Google, &tokens)
            .await
            .unwrap();

        assert_eq!(user.name, "Ada");
    }

    #[tokio::test]
    async fn test_tokens_from_other_provider_are_rejected() {
        let mut server = Server::new_async().await;
        let user_mock = server
            .mock("GET", "/github/user")
            .expect(0)
            .create_async()
            .await;

        let registry = Registry::new(
            vec![google(&server), github(&server)],
            reqwest::Client::new(),
        );
        let google_tokens = Tokens {
            provider: ProviderKind::Google,
            access_token: SecretString::from("ya29".to_string()),
            refresh_token: None,
            expires_at: None,
            token_type: "Bearer".to_string(),
            scopes: vec![],
        };

        let err = registry
            .fetch_profile(ProviderKind::Github, &google_tokens)
            .await
            .unwrap_err();

        assert_eq!(err.oauth_kind(), Some(&OAuthErrorKind::ProviderMismatch));
        user_mock.assert_async().await;
    }
}
