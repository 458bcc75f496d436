use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::*;

use domain::error::{DomainErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// Bodies are fixed strings; the underlying cause only ever reaches the log.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let cause = self
            .0
            .source()
            .map(|source| source.to_string())
            .unwrap_or_default();

        let (status, body) = match &self.0.error_kind {
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::UnknownProvider => (StatusCode::NOT_FOUND, "Unknown provider"),
                InternalErrorKind::InvalidState => {
                    (StatusCode::BAD_REQUEST, "Invalid OAuth state")
                }
                InternalErrorKind::Config => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR")
                }
            },
            DomainErrorKind::External(external_error_kind) => match external_error_kind {
                ExternalErrorKind::TokenExchange => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Failed to exchange token")
                }
                ExternalErrorKind::ProfileFetch => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get user info")
                }
                ExternalErrorKind::Other(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR")
                }
            },
        };

        warn!("Responding {status} for {:?}: {cause}", self.0.error_kind);
        (status, body).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: DomainError) -> (StatusCode, String) {
        let response = Error::from(err).into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_status_codes() {
        let cases = [
            (
                DomainError::internal(InternalErrorKind::UnknownProvider, "twitter"),
                StatusCode::NOT_FOUND,
                "Unknown provider",
            ),
            (
                DomainError::internal(InternalErrorKind::InvalidState, "bogus"),
                StatusCode::BAD_REQUEST,
                "Invalid OAuth state",
            ),
            (
                DomainError::external(ExternalErrorKind::TokenExchange, "invalid_grant"),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to exchange token",
            ),
            (
                DomainError::external(ExternalErrorKind::ProfileFetch, "401"),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get user info",
            ),
            (
                DomainError::internal(InternalErrorKind::Config, "bad url"),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL SERVER ERROR",
            ),
        ];

        for (err, expected_status, expected_body) in cases {
            let (status, body) = render(err).await;
            assert_eq!(status, expected_status);
            assert_eq!(body, expected_body);
        }
    }

    #[tokio::test]
    async fn test_body_never_contains_cause() {
        let err = DomainError::external(
            ExternalErrorKind::Other("connection reset".to_string()),
            "connection reset by peer",
        );

        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("connection reset"));
    }
}
