use crate::controller::{
    export_controller, health_check_controller, process_controller, summary_controller,
    transcription_controller,
};
use crate::{params, response, AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Meeting Notes API"
        ),
        paths(
            health_check_controller::health_check,
            transcription_controller::transcribe,
            summary_controller::summarize,
            process_controller::process,
            export_controller::export_docx,
        ),
        components(
            schemas(
                domain::meeting_summary::MeetingSummary,
                domain::meeting_summary::ActionItem,
                domain::meeting_summary::Priority,
                domain::summarization::LlmProvider,
                domain::pipeline::OutputFormat,
                params::summarize::SummarizeRequest,
                response::meeting::TranscribeResponse,
                response::meeting::ProcessResponse,
                response::ErrorResponse,
            )
        ),
        tags(
            (name = "meeting_notes", description = "Meeting audio transcription and summarization API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(transcription_routes(app_state.clone()))
        .merge(summary_routes(app_state.clone()))
        .merge(process_routes(app_state.clone()))
        .merge(export_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn transcription_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/transcribe", post(transcription_controller::transcribe))
        .layer(DefaultBodyLimit::max(upload_body_limit(&app_state)))
        .with_state(app_state)
}

fn summary_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/summarize", post(summary_controller::summarize))
        .with_state(app_state)
}

fn process_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/process", post(process_controller::process))
        .layer(DefaultBodyLimit::max(upload_body_limit(&app_state)))
        .with_state(app_state)
}

fn export_routes() -> Router {
    Router::new().route("/export/docx", post(export_controller::export_docx))
}

// Multipart encoding adds boundary and header overhead on top of the audio
// bytes, so the HTTP-level cap sits well above the audio ceiling. Oversized
// audio is then rejected by the upload validator with a descriptive message
// instead of a framework-level 413.
fn upload_body_limit(app_state: &AppState) -> usize {
    (app_state.config.max_audio_size_bytes() as usize) * 2
}
