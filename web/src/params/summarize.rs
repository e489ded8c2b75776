use domain::summarization::LlmProvider;
use serde::Deserialize;
use utoipa::ToSchema;

/// JSON body for summarizing an already transcribed meeting.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct SummarizeRequest {
    /// Transcript text to extract the summary from.
    pub(crate) transcript: String,
    /// LLM backend used for summary extraction.
    #[serde(default)]
    pub(crate) llm_provider: LlmProvider,
}
