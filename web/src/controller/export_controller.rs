//! Controller for exporting an existing summary as a Word document.

use crate::controller::docx_response;
use crate::params::export::ExportParams;
use crate::response::ErrorResponse;
use crate::Error;

use axum::extract::Query;
use axum::response::Response;
use axum::Json;

use domain::export::{self, ExportMetadata};
use domain::meeting_summary::MeetingSummary;
use log::*;

/// POST /export/docx
///
/// Render a client-supplied summary as a downloadable .docx. The summary
/// must satisfy the same shape rules the extraction stage enforces.
#[utoipa::path(
    post,
    path = "/export/docx",
    params(ExportParams),
    request_body = MeetingSummary,
    responses(
        (status = 200, description = "Document rendered as an attachment"),
        (status = 400, description = "Summary failed shape validation", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    )
)]
pub async fn export_docx(
    Query(params): Query<ExportParams>,
    Json(summary): Json<MeetingSummary>,
) -> Result<Response, Error> {
    debug!(
        "POST /export/docx | {} action items | source={:?}",
        summary.action_items.len(),
        params.original_filename
    );

    summary.validate()?;

    let metadata = ExportMetadata::new(params.original_filename, params.llm_provider);
    let bytes = export::render_docx(&summary, None, &metadata)?;

    Ok(docx_response(bytes))
}
