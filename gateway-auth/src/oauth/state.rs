//! The OAuth `state` correlation value.
//!
//! The state carries the provider identifier through the provider's consent
//! screen and back to the callback. It is never held in process memory, so
//! concurrent logins for different providers cannot observe each other.
//!
//! The value is not bound to a browser session and carries no nonce, so it
//! offers no CSRF protection.

use std::fmt;

use super::provider::ProviderKind;
use crate::error::{oauth_error, Error, OAuthErrorKind};

/// Opaque state value sent to the provider and echoed back on callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationState(String);

impl AuthorizationState {
    /// Create the state for a login attempt with `provider`.
    pub fn for_provider(provider: ProviderKind) -> Self {
        Self(provider.as_str().to_string())
    }

    /// Get the encoded state string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the provider from a state value returned on callback.
    ///
    /// A missing value, or one that names no supported provider, fails with
    /// `InvalidState`.
    pub fn parse(value: Option<&str>) -> Result<ProviderKind, Error> {
        let value = value
            .filter(|v| !v.is_empty())
            .ok_or_else(|| oauth_error(OAuthErrorKind::InvalidState, "missing state parameter"))?;

        value.parse::<ProviderKind>().map_err(|_| {
            oauth_error(
                OAuthErrorKind::InvalidState,
                "state does not identify a supported provider",
            )
        })
    }
}

impl fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
