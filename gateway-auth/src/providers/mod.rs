//! Provider configuration and the provider registry.

mod config;
mod registry;

pub use config::{
    default_endpoints, default_scopes, github_config, google_config, ProviderConfig,
    GITHUB_AUTH_URL, GITHUB_TOKEN_URL, GITHUB_USERINFO_URL, GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL,
    GOOGLE_USERINFO_URL,
};
pub use registry::Registry;
