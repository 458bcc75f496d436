//! GitHub OAuth provider implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{oauth_error, oauth_error_from, Error, OAuthErrorKind};
use crate::oauth::{OAuthClient, UserInfo};

/// Raw body of `GET https://api.github.com/user`.
///
/// `id` is numeric and `login` is the handle shown as display name. The full
/// `name` is often null and is not used.
#[derive(Debug, Deserialize)]
struct GithubProfile {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// GitHub OAuth provider.
pub struct Provider {
    client: OAuthClient,
}

impl Provider {
    /// Create a new GitHub OAuth provider.
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

/// Map a GitHub profile: `id` → id, `login` → name, `email` → email.
pub(crate) fn parse_profile(body: &[u8]) -> Result<UserInfo, Error> {
    let profile: GithubProfile = serde_json::from_slice(body)
        .map_err(|e| oauth_error_from(OAuthErrorKind::ProfileFetchFailed, e))?;

    let id = profile
        .id
        .ok_or_else(|| oauth_error(OAuthErrorKind::ProfileFetchFailed, "GitHub profile has no id"))?;
    let name = profile
        .login
        .filter(|s| !s.is_empty())
        .ok_or_else(|| oauth_error(OAuthErrorKind::ProfileFetchFailed, "GitHub profile has no login"))?;

    Ok(UserInfo {
        id: id.to_string(),
        name,
        email: profile.email.filter(|s| !s.is_empty()),
    })
}
