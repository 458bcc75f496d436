//! # gateway-auth
//!
//! OAuth 2.0 authorization-code infrastructure for the login gateway:
//! - Provider configuration and the read-only provider registry
//! - The `state` codec that threads the provider through the consent screen
//! - Authorization-code exchange and user-info retrieval
//! - Provider-specific profile mapping (Google, GitHub)
//! - HTTP client building
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gateway_auth::{
//!     http::HttpClientBuilder,
//!     oauth::{AuthorizationState, ProviderKind, TokenExchanger, ProfileFetcher},
//!     providers::{google_config, Registry},
//! };
//!
//! let registry = Registry::new(vec![google_config(id, secret, redirect)?], HttpClientBuilder::new().build()?);
//! let provider = registry.lookup(ProviderKind::Google)?;
//! let request = provider.authorization_url(&AuthorizationState::for_provider(ProviderKind::Google));
//! ```

pub mod error;
pub mod http;
pub mod oauth;
pub mod providers;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
