//! Controller for standalone audio transcription.

use crate::controller::read_audio_upload;
use crate::response::meeting::TranscribeResponse;
use crate::response::ErrorResponse;
use crate::{AppState, Error};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use log::*;

/// POST /transcribe
///
/// Accept one uploaded audio file, store it and return its transcript.
#[utoipa::path(
    post,
    path = "/transcribe",
    request_body(content_type = "multipart/form-data", description = "Audio file in a `file` field"),
    responses(
        (status = 200, description = "Audio transcribed", body = TranscribeResponse),
        (status = 400, description = "Upload rejected by validation", body = ErrorResponse),
        (status = 503, description = "Transcription provider unavailable", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    )
)]
pub async fn transcribe(
    State(app_state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    let (filename, payload) = read_audio_upload(multipart).await?;
    debug!(
        "POST /transcribe | file={} | {} bytes",
        filename.as_deref().unwrap_or("<unnamed>"),
        payload.len()
    );

    let audio = domain::upload::store(&app_state.config, filename.as_deref(), &payload).await?;
    let transcript = domain::transcription::transcribe(&app_state.config, &audio).await?;

    Ok((
        StatusCode::OK,
        Json(TranscribeResponse {
            original_filename: audio.original_filename,
            saved_filename: audio.stored_filename,
            transcript,
        }),
    ))
}
