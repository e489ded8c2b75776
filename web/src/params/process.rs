use domain::pipeline::OutputFormat;
use domain::summarization::LlmProvider;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for the one-shot processing endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub(crate) struct ProcessParams {
    /// LLM backend used for summary extraction.
    #[serde(default)]
    pub(crate) llm_provider: LlmProvider,
    /// Response shape: inline JSON or a rendered .docx attachment.
    #[serde(default)]
    pub(crate) output: OutputFormat,
}
