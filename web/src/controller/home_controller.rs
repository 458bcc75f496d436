use crate::AppState;
use axum::extract::State;
use axum::response::{Html, IntoResponse};

/// GET landing page
///
/// Lists a login link for every configured identity provider.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "HTML page with one login link per provider", body = String, content_type = "text/html"),
    )
)]
pub async fn index(State(app_state): State<AppState>) -> impl IntoResponse {
    let providers = app_state.registry().providers();

    let mut body = String::from(
        "<!DOCTYPE html>\n<html>\n<head><title>Sign in</title></head>\n<body>\n<h1>Sign in</h1>\n",
    );
    if providers.is_empty() {
        body.push_str("<p>No identity providers are configured.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for provider in providers {
            body.push_str(&format!(
                "<li><a href=\"/auth/{}/login\">Login with {}</a></li>\n",
                provider.as_str(),
                provider.display_name()
            ));
        }
        body.push_str("</ul>\n");
    }
    body.push_str("</body>\n</html>\n");

    Html(body)
}
