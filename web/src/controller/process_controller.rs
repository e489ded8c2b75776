//! Controller for the one-shot upload-to-notes pipeline.

use crate::controller::{docx_response, read_audio_upload};
use crate::params::process::ProcessParams;
use crate::response::meeting::ProcessResponse;
use crate::response::ErrorResponse;
use crate::{AppState, Error};

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use log::*;

/// POST /process
///
/// Run the full pipeline on one uploaded audio file: validate, store,
/// transcribe, summarize and (for `output=docx`) render a Word document.
#[utoipa::path(
    post,
    path = "/process",
    params(ProcessParams),
    request_body(content_type = "multipart/form-data", description = "Audio file in a `file` field"),
    responses(
        (status = 200, description = "Pipeline completed; JSON body or .docx attachment depending on `output`", body = ProcessResponse),
        (status = 400, description = "Upload rejected by validation", body = ErrorResponse),
        (status = 503, description = "An AI provider call failed", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    )
)]
pub async fn process(
    State(app_state): State<AppState>,
    Query(params): Query<ProcessParams>,
    multipart: Multipart,
) -> Result<Response, Error> {
    let (filename, payload) = read_audio_upload(multipart).await?;
    debug!(
        "POST /process | file={} | {} bytes | llm={} | output={}",
        filename.as_deref().unwrap_or("<unnamed>"),
        payload.len(),
        params.llm_provider,
        params.output
    );

    let outcome = domain::pipeline::run(
        &app_state.config,
        filename.as_deref(),
        &payload,
        params.llm_provider,
        params.output,
    )
    .await?;

    let response = match outcome.document {
        Some(bytes) => docx_response(bytes),
        None => (
            StatusCode::OK,
            Json(ProcessResponse {
                transcript: outcome.transcript,
                summary: outcome.summary,
            }),
        )
            .into_response(),
    };

    Ok(response)
}
