//! Controller for the OAuth authorization-code login flow.
//!
//! Both endpoints are reached through browser redirects, so errors are
//! rendered as short plain-text bodies.

use crate::{AppState, Error};

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect};
use domain::login::{self, CallbackParams, CallbackStage};
use log::*;

/// GET /auth/{provider}/login
///
/// Redirects the browser to the provider's consent page.
#[utoipa::path(
    get,
    path = "/auth/{provider}/login",
    params(
        ("provider" = String, Path, description = "Provider identifier, `google` or `github`"),
    ),
    responses(
        (status = 307, description = "Redirect to the provider authorization endpoint"),
        (status = 404, description = "Unknown or unconfigured provider"),
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let request = login::begin_login(app_state.registry(), &provider)?;
    Ok(Redirect::temporary(&request.url))
}

/// GET /auth/{provider}/callback
///
/// Exchanges the authorization code, fetches the user's profile and greets them.
#[utoipa::path(
    get,
    path = "/auth/{provider}/callback",
    params(
        ("provider" = String, Path, description = "Provider identifier, `google` or `github`"),
        ("code" = Option<String>, Query, description = "Authorization code issued by the provider"),
        ("state" = Option<String>, Query, description = "State echoed back by the provider"),
        ("error" = Option<String>, Query, description = "Set by the provider when consent was denied"),
    ),
    responses(
        (status = 200, description = "Greeting for the signed-in user", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid OAuth state"),
        (status = 404, description = "Unknown or unconfigured provider"),
        (status = 500, description = "Token exchange or profile fetch failed"),
    )
)]
pub async fn callback(
    State(app_state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    let route_provider = login::resolve_provider(app_state.registry(), &provider)?;
    debug!("Callback received for {route_provider}");

    let signed_in = login::handle_callback(
        app_state.exchanger(),
        app_state.fetcher(),
        route_provider,
        &params,
    )
    .await?;

    let body = signed_in.greeting();
    debug!(
        "{} callback: {:?} -> {:?}",
        signed_in.provider,
        CallbackStage::ProfileObtained,
        CallbackStage::Responded
    );
    Ok(body)
}
