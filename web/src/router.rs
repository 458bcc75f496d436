use crate::controller::{health_check_controller, home_controller, oauth_controller};
use crate::AppState;
use axum::{routing::get, Router};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "OAuth Login Gateway"
        ),
        paths(
            home_controller::index,
            health_check_controller::health_check,
            oauth_controller::login,
            oauth_controller::callback,
        ),
        tags(
            (name = "oauth_gateway", description = "Sign in with Google or GitHub")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(home_routes(app_state.clone()))
        .merge(health_routes())
        .merge(oauth_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn home_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home_controller::index))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn oauth_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/{provider}/login", get(oauth_controller::login))
        .route("/auth/{provider}/callback", get(oauth_controller::callback))
        .with_state(app_state)
}
