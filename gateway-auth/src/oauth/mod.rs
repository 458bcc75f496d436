//! OAuth 2.0 authorization-code flow infrastructure.
//!
//! Provides the provider abstraction, the shared transport and the `state`
//! codec used by the login gateway.

mod client;
mod provider;
mod state;

pub mod providers;
pub mod token;

pub use client::OAuthClient;
pub use provider::{
    AuthorizationRequest, ProfileFetcher, Provider, ProviderKind, TokenExchanger, UserInfo,
};
pub use state::AuthorizationState;
