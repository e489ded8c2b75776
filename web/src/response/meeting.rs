//! Response DTOs for the transcription and processing endpoints.

use domain::meeting_summary::MeetingSummary;
use serde::Serialize;
use utoipa::ToSchema;

/// Result of transcribing one uploaded audio file.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TranscribeResponse {
    /// Filename as submitted by the client.
    pub original_filename: String,
    /// Generated filename the audio was stored under.
    pub saved_filename: String,
    /// Full transcript text.
    pub transcript: String,
}

/// Result of the full pipeline when JSON output is requested.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProcessResponse {
    /// Full transcript text.
    pub transcript: String,
    /// Structured summary extracted from the transcript.
    pub summary: MeetingSummary,
}
