use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for the standalone document export endpoint. Both are
/// provenance labels rendered into the document header when present.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub(crate) struct ExportParams {
    /// Name of the audio file the summary came from.
    pub(crate) original_filename: Option<String>,
    /// Label of the LLM provider that produced the summary.
    pub(crate) llm_provider: Option<String>,
}
