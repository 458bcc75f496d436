//! Error types for the `domain` layer.
use gateway_auth::error::{
    ConfigErrorKind, Error as GatewayAuthError, ErrorKind as GatewayAuthErrorKind,
    OAuthErrorKind,
};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. `web` depends on `domain` but never directly on `gateway-auth`,
/// so provider errors are translated here and `web` picks HTTP status codes from the
/// resulting `error_kind`.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Errors caused by the request or by this process's own configuration.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// The route names a provider that is not supported or not configured.
    UnknownProvider,
    /// The callback `state` does not map to the provider handling the callback.
    InvalidState,
    Config,
}

/// Errors reported by, or while talking to, an identity provider.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    TokenExchange,
    ProfileFetch,
    Other(String),
}

impl Error {
    pub fn internal(kind: InternalErrorKind, message: &str) -> Self {
        Error {
            source: Some(message.to_string().into()),
            error_kind: DomainErrorKind::Internal(kind),
        }
    }

    pub fn external(kind: ExternalErrorKind, message: &str) -> Self {
        Error {
            source: Some(message.to_string().into()),
            error_kind: DomainErrorKind::External(kind),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {:?}", self.error_kind)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `gateway-auth` layer to the `domain` layer.
impl From<GatewayAuthError> for Error {
    fn from(err: GatewayAuthError) -> Self {
        let error_kind = match &err.error_kind {
            GatewayAuthErrorKind::OAuth(kind) => match kind {
                OAuthErrorKind::UnknownProvider => {
                    DomainErrorKind::Internal(InternalErrorKind::UnknownProvider)
                }
                OAuthErrorKind::InvalidState => {
                    DomainErrorKind::Internal(InternalErrorKind::InvalidState)
                }
                OAuthErrorKind::TokenExchangeFailed => {
                    DomainErrorKind::External(ExternalErrorKind::TokenExchange)
                }
                OAuthErrorKind::ProfileFetchFailed | OAuthErrorKind::ProviderMismatch => {
                    DomainErrorKind::External(ExternalErrorKind::ProfileFetch)
                }
            },
            GatewayAuthErrorKind::Config(
                ConfigErrorKind::InvalidEndpoint | ConfigErrorKind::MissingCredentials,
            ) => DomainErrorKind::Internal(InternalErrorKind::Config),
            GatewayAuthErrorKind::Http(_) => {
                DomainErrorKind::External(ExternalErrorKind::Other(err.to_string()))
            }
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}
