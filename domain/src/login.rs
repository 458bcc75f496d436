//! Login and callback orchestration for the OAuth authorization-code flow.
//!
//! `begin_login` produces the provider redirect; `handle_callback` drives a
//! single callback through token exchange and profile fetch. Nothing is
//! shared between requests except the read-only provider registry.

use crate::error::{Error, ExternalErrorKind, InternalErrorKind};
use crate::gateway::oauth::{
    AuthorizationRequest, AuthorizationState, ProfileFetcher, ProviderKind, Registry,
    TokenExchanger, UserInfo,
};
use log::*;
use serde::Deserialize;

/// Query parameters a provider appends when redirecting back to the gateway.
#[derive(Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set instead of `code` when the user denies consent.
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Progress of one callback request. Any failure moves to `Failed`; there
/// are no retries. The domain flow ends at `ProfileObtained`; the web layer
/// records `Responded` once the greeting is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackStage {
    AwaitingCode,
    CodeReceived,
    TokenObtained,
    ProfileObtained,
    Responded,
    Failed,
}

/// Outcome of a successful callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub provider: ProviderKind,
    pub user: UserInfo,
}

impl SignedIn {
    /// Plain-text greeting rendered for the authenticated user.
    pub fn greeting(&self) -> String {
        format!("Hello there, {}!", self.user.name)
    }
}

struct CallbackFlow {
    provider: ProviderKind,
    stage: CallbackStage,
}

impl CallbackFlow {
    fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            stage: CallbackStage::AwaitingCode,
        }
    }

    fn advance(&mut self, next: CallbackStage) {
        debug!(
            "{} callback: {:?} -> {:?}",
            self.provider, self.stage, next
        );
        self.stage = next;
    }

    fn fail(&mut self, err: Error) -> Error {
        warn!(
            "{} callback failed while {:?}: {:?}",
            self.provider, self.stage, err
        );
        self.stage = CallbackStage::Failed;
        err
    }
}

/// Resolve a provider identifier from a route to a configured provider.
pub fn resolve_provider(registry: &Registry, provider_id: &str) -> Result<ProviderKind, Error> {
    let provider = registry.lookup_str(provider_id).inspect_err(|_| {
        warn!("Rejected request for unknown provider {:?}", provider_id)
    })?;
    Ok(provider.kind())
}

/// Build the authorization redirect for `provider_id`.
///
/// The `state` carried in the URL is the provider identifier, so the
/// callback can recover the provider without any server-side storage.
pub fn begin_login(registry: &Registry, provider_id: &str) -> Result<AuthorizationRequest, Error> {
    let provider = registry.lookup_str(provider_id).inspect_err(|_| {
        warn!("Rejected login for unknown provider {:?}", provider_id)
    })?;
    let kind = provider.kind();

    let state = AuthorizationState::for_provider(kind);
    let request = provider.authorization_url(&state);

    info!("Redirecting browser to {} for login", kind.display_name());
    Ok(request)
}

/// Complete a login from the provider's callback.
///
/// `route_provider` is the provider named by the callback route. The
/// provider is recovered from `state`, which must name the same provider.
/// State problems are rejected before the exchanger is called, and the
/// fetcher is only called with tokens from a successful exchange.
pub async fn handle_callback(
    exchanger: &dyn TokenExchanger,
    fetcher: &dyn ProfileFetcher,
    route_provider: ProviderKind,
    params: &CallbackParams,
) -> Result<SignedIn, Error> {
    let mut flow = CallbackFlow::new(route_provider);

    let provider = AuthorizationState::parse(params.state.as_deref())
        .map_err(|e| flow.fail(e.into()))?;
    if provider != route_provider {
        return Err(flow.fail(Error::internal(
            InternalErrorKind::InvalidState,
            &format!("state names {provider} but callback arrived for {route_provider}"),
        )));
    }

    if let Some(denied) = params.error.as_deref() {
        return Err(flow.fail(Error::external(
            ExternalErrorKind::TokenExchange,
            &format!(
                "provider returned error {denied}: {}",
                params.error_description.as_deref().unwrap_or_default()
            ),
        )));
    }

    let code = params
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            flow.fail(Error::external(
                ExternalErrorKind::TokenExchange,
                "callback carried no authorization code",
            ))
        })?;
    flow.advance(CallbackStage::CodeReceived);

    let tokens = exchanger
        .exchange(provider, code)
        .await
        .map_err(|e| flow.fail(e.into()))?;
    flow.advance(CallbackStage::TokenObtained);

    let user = fetcher
        .fetch_profile(provider, &tokens)
        .await
        .map_err(|e| flow.fail(e.into()))?;
    flow.advance(CallbackStage::ProfileObtained);

    info!("User {} signed in with {}", user.id, provider.display_name());

    Ok(SignedIn { provider, user })
}
