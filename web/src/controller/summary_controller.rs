//! Controller for summarizing an existing transcript.

use crate::params::summarize::SummarizeRequest;
use crate::response::ErrorResponse;
use crate::{AppState, Error};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use domain::error::{DomainErrorKind, Error as DomainError, ValidationErrorKind};
use domain::meeting_summary::MeetingSummary;
use log::*;

/// POST /summarize
///
/// Extract a structured summary from transcript text supplied by the client,
/// skipping the upload and transcription stages.
#[utoipa::path(
    post,
    path = "/summarize",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary extracted", body = MeetingSummary),
        (status = 400, description = "Empty transcript", body = ErrorResponse),
        (status = 503, description = "Summarization provider unavailable", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    )
)]
pub async fn summarize(
    State(app_state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<impl IntoResponse, Error> {
    debug!(
        "POST /summarize | {} chars | llm={}",
        request.transcript.len(),
        request.llm_provider
    );

    if request.transcript.trim().is_empty() {
        warn!("Rejecting summarize request with an empty transcript");
        return Err(Error(DomainError {
            source: None,
            error_kind: DomainErrorKind::Validation(ValidationErrorKind::Invalid(
                "Transcript must not be empty".to_string(),
            )),
        }));
    }

    let summary = domain::summarization::summarize(
        &app_state.config,
        &request.transcript,
        request.llm_provider,
    )
    .await?;

    Ok((StatusCode::OK, Json(summary)))
}
