pub(crate) mod export_controller;
pub(crate) mod health_check_controller;
pub(crate) mod process_controller;
pub(crate) mod summary_controller;
pub(crate) mod transcription_controller;

use crate::Error;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use domain::error::{DomainErrorKind, Error as DomainError, ValidationErrorKind};
use domain::export::{DOCX_MIME, DOWNLOAD_FILENAME};
use log::*;

/// Pull the uploaded audio out of a multipart body: the first field named
/// `file`. Returns the client-submitted filename (captured before the body
/// is consumed) and the raw bytes.
pub(crate) async fn read_audio_upload(
    mut multipart: Multipart,
) -> Result<(Option<String>, Vec<u8>), Error> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().map(|name| name.to_string());
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok((filename, bytes.to_vec()));
    }

    warn!("Multipart body contained no 'file' field");
    Err(Error(DomainError {
        source: None,
        error_kind: DomainErrorKind::Validation(ValidationErrorKind::Invalid(
            "Missing file field".to_string(),
        )),
    }))
}

/// Build the .docx attachment response shared by the process and export
/// endpoints.
pub(crate) fn docx_response(bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

// Body-read failures (aborted uploads, bodies past the size layer's limit)
// surface as 400s rather than 500s.
fn multipart_error(err: MultipartError) -> Error {
    warn!("Failed to read multipart body: {err:?}");
    Error(DomainError {
        source: Some(Box::new(err)),
        error_kind: DomainErrorKind::Validation(ValidationErrorKind::Invalid(
            "Malformed multipart body".to_string(),
        )),
    })
}
