//! Error types for the `gateway-auth` crate.
//!
//! Follows the same pattern as domain::error with a root Error struct and error kind enums.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for gateway-auth crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in gateway-auth.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    OAuth(OAuthErrorKind),
    Http(HttpErrorKind),
    Config(ConfigErrorKind),
}

/// Errors from OAuth operations.
#[derive(Debug, PartialEq)]
pub enum OAuthErrorKind {
    /// No provider is registered under the requested identifier.
    UnknownProvider,
    /// The callback `state` does not map to a configured provider.
    InvalidState,
    TokenExchangeFailed,
    ProfileFetchFailed,
    /// Tokens were presented to a provider other than the one that issued them.
    ProviderMismatch,
}

/// Errors from building provider configuration.
#[derive(Debug, PartialEq)]
pub enum ConfigErrorKind {
    InvalidEndpoint,
    MissingCredentials,
}

/// Errors from HTTP client operations.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
    RequestFailed,
    Network,
}

impl Error {
    /// Returns the OAuth error kind, if this is an OAuth error.
    pub fn oauth_kind(&self) -> Option<&OAuthErrorKind> {
        match &self.error_kind {
            ErrorKind::OAuth(kind) => Some(kind),
            ErrorKind::Http(_) | ErrorKind::Config(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::OAuth(kind) => write!(f, "OAuth error: {:?}", kind),
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind),
            ErrorKind::Config(kind) => write!(f, "Config error: {:?}", kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        } else if err.is_request() {
            ErrorKind::Http(HttpErrorKind::RequestFailed)
        } else {
            ErrorKind::Http(HttpErrorKind::Network)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Config(ConfigErrorKind::InvalidEndpoint),
        }
    }
}

/// Helper function to create configuration errors.
pub fn config_error(kind: ConfigErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Config(kind),
    }
}

/// Helper function to create OAuth errors.
pub fn oauth_error(kind: OAuthErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::OAuth(kind),
    }
}

/// Wraps an underlying error as the cause of an OAuth error.
pub fn oauth_error_from<E>(kind: OAuthErrorKind, err: E) -> Error
where
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    Error {
        source: Some(err.into()),
        error_kind: ErrorKind::OAuth(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_does_not_include_source() {
        let err = oauth_error(OAuthErrorKind::TokenExchangeFailed, "bad_verification_code");
        assert_eq!(err.to_string(), "OAuth error: TokenExchangeFailed");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_oauth_kind() {
        let err = oauth_error(OAuthErrorKind::InvalidState, "nope");
        assert_eq!(err.oauth_kind(), Some(&OAuthErrorKind::InvalidState));

        let err = Error {
            source: None,
            error_kind: ErrorKind::Http(HttpErrorKind::Network),
        };
        assert_eq!(err.oauth_kind(), None);
    }
}
