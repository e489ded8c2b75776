use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::response::ErrorResponse;
use domain::error::{DomainErrorKind, Error as DomainError};

extern crate log;
use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(pub DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// Every error leaves as the same JSON envelope: {"status_code": ..., "error": ...}.
// Validation and provider kinds carry a client-safe message in their Display;
// internal kinds do not, so those clients get a generic body and the detail
// stays in the server log.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let DomainError { source, error_kind } = self.0;

        let (status_code, message) = match error_kind {
            DomainErrorKind::Validation(kind) => (StatusCode::BAD_REQUEST, kind.to_string()),
            DomainErrorKind::Provider(kind) => (StatusCode::SERVICE_UNAVAILABLE, kind.to_string()),
            DomainErrorKind::Internal(kind) => {
                error!("Internal error: {kind:?}, source: {source:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
        };

        (
            status_code,
            Json(ErrorResponse {
                status_code: status_code.as_u16(),
                error: message,
            }),
        )
            .into_response()
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
