//! Google OAuth provider implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{oauth_error, oauth_error_from, Error, OAuthErrorKind};
use crate::oauth::{OAuthClient, UserInfo};

/// Raw body of Google's OpenID Connect user-info endpoint.
#[derive(Debug, Deserialize)]
struct GoogleProfile {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Google OAuth provider.
pub struct Provider {
    client: OAuthClient,
}

impl Provider {
    /// Create a new Google OAuth provider.
    pub fn new(client: OAuthClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn client(&self) -> &OAuthClient {
        &self.client
    }

    fn parse_profile(&self, body: &[u8]) -> Result<UserInfo, Error> {
        parse_profile(body)
    }
}

/// Map a Google profile: `sub` → id, `name` → name, `email` → email.
pub(crate) fn parse_profile(body: &[u8]) -> Result<UserInfo, Error> {
    let profile: GoogleProfile = serde_json::from_slice(body)
        .map_err(|e| oauth_error_from(OAuthErrorKind::ProfileFetchFailed, e))?;

    let id = profile
        .sub
        .filter(|s| !s.is_empty())
        .ok_or_else(|| oauth_error(OAuthErrorKind::ProfileFetchFailed, "Google profile has no sub"))?;
    let name = profile
        .name
        .filter(|s| !s.is_empty())
        .ok_or_else(|| oauth_error(OAuthErrorKind::ProfileFetchFailed, "Google profile has no name"))?;

    Ok(UserInfo {
        id,
        name,
        email: profile.email.filter(|s| !s.is_empty()),
    })
}
