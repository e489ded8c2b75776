//! Structured summarization of meeting transcripts.
//!
//! Two interchangeable backends produce the same [`MeetingSummary`] shape:
//! Anthropic via a forced tool call, and OpenAI via a JSON-schema constrained
//! chat completion. The caller picks one per request; there is no fallback
//! from one provider to the other.

use crate::error::{DomainErrorKind, Error, ProviderErrorKind};
use crate::gateway::anthropic::{AnthropicClient, Message, MessagesRequest, Tool, ToolChoice};
use crate::gateway::openai::{
    ChatCompletionRequest, ChatMessage, JsonSchemaFormat, OpenAiClient, ResponseFormat,
};
use crate::meeting_summary::MeetingSummary;
use crate::prompt::SYSTEM_PROMPT;
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;
use std::fmt;
use utoipa::ToSchema;

/// Name of the tool Claude is forced to call so its answer arrives as
/// structured input rather than prose.
pub const SUMMARY_TOOL_NAME: &str = "record_meeting_summary";

const SUMMARY_MAX_TOKENS: u32 = 900;

const MALFORMED_OUTPUT_DETAIL: &str =
    "Model output was not valid JSON. Please refine the prompt or add retries.";

/// Which LLM backend extracts the structured summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Claude,
    OpenAi,
}

impl LlmProvider {
    /// Provider name as it appears in client-facing error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            LlmProvider::Claude => "Claude",
            LlmProvider::OpenAi => "OpenAI",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LlmProvider::Claude => write!(f, "claude"),
            LlmProvider::OpenAi => write!(f, "openai"),
        }
    }
}

/// Extract a structured meeting summary from a transcript using the
/// selected provider.
pub async fn summarize(
    config: &Config,
    transcript: &str,
    provider: LlmProvider,
) -> Result<MeetingSummary, Error> {
    debug!(
        "Summarizing transcript ({} chars) with provider {provider}",
        transcript.len()
    );

    match provider {
        LlmProvider::Claude => summarize_with_claude(config, transcript).await,
        LlmProvider::OpenAi => summarize_with_openai(config, transcript).await,
    }
}

async fn summarize_with_claude(config: &Config, transcript: &str) -> Result<MeetingSummary, Error> {
    let client = AnthropicClient::new(config)?;

    let request = MessagesRequest {
        model: config.claude_model.clone(),
        max_tokens: SUMMARY_MAX_TOKENS,
        system: SYSTEM_PROMPT.to_string(),
        messages: vec![Message {
            role: "user".to_string(),
            content: format!("Transcript:\n{transcript}"),
        }],
        tools: vec![Tool {
            name: SUMMARY_TOOL_NAME.to_string(),
            description: "Return a structured meeting summary extracted from the transcript."
                .to_string(),
            input_schema: MeetingSummary::json_schema(),
        }],
        tool_choice: ToolChoice {
            choice_type: "tool".to_string(),
            name: SUMMARY_TOOL_NAME.to_string(),
        },
    };

    let response = client.create_message(request).await?;

    let input = response
        .content
        .into_iter()
        .find(|block| block.block_type == "tool_use")
        .and_then(|block| block.input)
        .ok_or_else(|| {
            warn!("Claude response contained no tool_use block");
            Error::provider(ProviderErrorKind::MalformedOutput {
                detail: "Claude did not return structured tool output.".to_string(),
            })
        })?;

    parse_summary(input)
}

async fn summarize_with_openai(config: &Config, transcript: &str) -> Result<MeetingSummary, Error> {
    let client = OpenAiClient::new(config)?;

    let request = ChatCompletionRequest {
        model: config.openai_model.clone(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: format!("Transcript:\n{transcript}"),
            },
        ],
        response_format: ResponseFormat {
            format_type: "json_schema".to_string(),
            json_schema: JsonSchemaFormat {
                name: "meeting_summary".to_string(),
                schema: MeetingSummary::json_schema(),
            },
        },
    };

    let response = client.create_chat_completion(request).await?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| {
            warn!("OpenAI response contained no message content");
            Error::provider(ProviderErrorKind::MalformedOutput {
                detail: MALFORMED_OUTPUT_DETAIL.to_string(),
            })
        })?;

    let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        warn!("OpenAI returned content that is not valid JSON: {e:?}");
        Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::Provider(ProviderErrorKind::MalformedOutput {
                detail: MALFORMED_OUTPUT_DETAIL.to_string(),
            }),
        }
    })?;

    parse_summary(value)
}

/// Deserialize and shape-check the model's structured output. Both providers
/// funnel through here so schema drift fails identically for each.
fn parse_summary(value: serde_json::Value) -> Result<MeetingSummary, Error> {
    let summary: MeetingSummary = serde_json::from_value(value).map_err(|e| {
        warn!("Model output did not match the summary schema: {e:?}");
        Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::Provider(ProviderErrorKind::MalformedOutput {
                detail: MALFORMED_OUTPUT_DETAIL.to_string(),
            }),
        }
    })?;

    summary.validate().map_err(|e| {
        warn!("Model output failed shape validation: {e:?}");
        Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::Provider(ProviderErrorKind::MalformedOutput {
                detail: MALFORMED_OUTPUT_DETAIL.to_string(),
            }),
        }
    })?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn claude_config(base_url: &str) -> Config {
        Config::parse_from(["meeting_notes_api"])
            .set_anthropic_base_url(base_url.to_string())
            .set_anthropic_api_key(Some("test-key".to_string()))
    }

    fn openai_config(base_url: &str) -> Config {
        Config::parse_from(["meeting_notes_api"])
            .set_openai_base_url(base_url.to_string())
            .set_openai_api_key(Some("test-key".to_string()))
    }

    fn summary_json() -> serde_json::Value {
        serde_json::json!({
            "meeting_summary": "Discussed the release plan.",
            "participants": ["Ana", "Bo"],
            "decisions": ["Ship on Friday"],
            "action_items": [
                {"task": "Write release notes", "owner": "Ana", "due_date": "Friday", "priority": "high"}
            ]
        })
    }

    #[tokio::test]
    async fn test_summarize_with_claude_parses_tool_output() {
        let mut server = mockito::Server::new_async().await;
        let config = claude_config(&server.url());

        let response_body = serde_json::json!({
            "content": [
                {"type": "tool_use", "name": SUMMARY_TOOL_NAME, "input": summary_json()}
            ]
        });
        let mock = server
            .mock("POST", "/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", "2023-06-01")
            .match_header("anthropic-beta", "structured-outputs-2025-11-13")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "max_tokens": 900,
                "tool_choice": {"type": "tool", "name": SUMMARY_TOOL_NAME}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body.to_string())
            .create_async()
            .await;

        let summary = summarize(&config, "We talked about the release.", LlmProvider::Claude)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(summary.meeting_summary, "Discussed the release plan.");
        assert_eq!(summary.participants, vec!["Ana", "Bo"]);
        assert_eq!(summary.action_items.len(), 1);
        assert_eq!(summary.action_items[0].task, "Write release notes");
    }

    #[tokio::test]
    async fn test_summarize_with_openai_parses_message_content() {
        let mut server = mockito::Server::new_async().await;
        let config = openai_config(&server.url());

        let response_body = serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": summary_json().to_string()}}
            ]
        });
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "response_format": {"type": "json_schema"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body.to_string())
            .create_async()
            .await;

        let summary = summarize(&config, "We talked about the release.", LlmProvider::OpenAi)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(summary.decisions, vec!["Ship on Friday"]);
    }

    #[tokio::test]
    async fn test_claude_without_tool_output_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let config = claude_config(&server.url());

        let response_body = serde_json::json!({
            "content": [{"type": "text", "text": "Here is your summary..."}]
        });
        let _mock = server
            .mock("POST", "/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body.to_string())
            .create_async()
            .await;

        let err = summarize(&config, "transcript", LlmProvider::Claude)
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Provider(ProviderErrorKind::MalformedOutput {
                detail: "Claude did not return structured tool output.".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_openai_non_json_content_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let config = openai_config(&server.url());

        let response_body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Sure! Here it is:"}}]
        });
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body.to_string())
            .create_async()
            .await;

        let err = summarize(&config, "transcript", LlmProvider::OpenAi)
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Provider(ProviderErrorKind::MalformedOutput {
                detail: MALFORMED_OUTPUT_DETAIL.to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let config = claude_config(&server.url());

        // meeting_summary has the wrong type
        let response_body = serde_json::json!({
            "content": [
                {"type": "tool_use", "name": SUMMARY_TOOL_NAME, "input": {"meeting_summary": 42}}
            ]
        });
        let _mock = server
            .mock("POST", "/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body.to_string())
            .create_async()
            .await;

        let err = summarize(&config, "transcript", LlmProvider::Claude)
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Provider(ProviderErrorKind::MalformedOutput {
                detail: MALFORMED_OUTPUT_DETAIL.to_string()
            })
        );
        assert!(err.source.is_some());
    }

    #[tokio::test]
    async fn test_claude_quota_exceeded_message() {
        let mut server = mockito::Server::new_async().await;
        let config = claude_config(&server.url());

        let _mock = server
            .mock("POST", "/messages")
            .with_status(429)
            .with_body(r#"{"error": {"type": "rate_limit_error"}}"#)
            .create_async()
            .await;

        let err = summarize(&config, "transcript", LlmProvider::Claude)
            .await
            .unwrap_err();

        match err.error_kind {
            DomainErrorKind::Provider(kind) => assert_eq!(
                kind.to_string(),
                "Claude API quota exceeded. Please check billing configuration."
            ),
            other => panic!("Expected a provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_openai_authentication_failure_message() {
        let mut server = mockito::Server::new_async().await;
        let config = openai_config(&server.url());

        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let err = summarize(&config, "transcript", LlmProvider::OpenAi)
            .await
            .unwrap_err();

        match err.error_kind {
            DomainErrorKind::Provider(kind) => assert_eq!(
                kind.to_string(),
                "OpenAI authentication failed. Please verify the API key."
            ),
            other => panic!("Expected a provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_claude_key_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let config = claude_config(&server.url()).set_anthropic_api_key(None);

        let mock = server.mock("POST", "/messages").expect(0).create_async().await;

        let err = summarize(&config, "transcript", LlmProvider::Claude)
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Provider(ProviderErrorKind::MissingCredential {
                env_var: "ANTHROPIC_API_KEY".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_claude_failure_does_not_fall_back_to_openai() {
        let mut claude_server = mockito::Server::new_async().await;
        let mut openai_server = mockito::Server::new_async().await;
        let config = Config::parse_from(["meeting_notes_api"])
            .set_anthropic_base_url(claude_server.url())
            .set_anthropic_api_key(Some("test-key".to_string()))
            .set_openai_base_url(openai_server.url())
            .set_openai_api_key(Some("test-key".to_string()));

        let _claude_mock = claude_server
            .mock("POST", "/messages")
            .with_status(429)
            .create_async()
            .await;
        let openai_mock = openai_server
            .mock("POST", "/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let result = summarize(&config, "transcript", LlmProvider::Claude).await;

        openai_mock.assert_async().await;
        assert!(result.is_err());
    }

    #[test]
    fn test_llm_provider_deserializes_from_lowercase() {
        let claude: LlmProvider = serde_json::from_str(r#""claude""#).unwrap();
        let openai: LlmProvider = serde_json::from_str(r#""openai""#).unwrap();

        assert_eq!(claude, LlmProvider::Claude);
        assert_eq!(openai, LlmProvider::OpenAi);
        assert_eq!(LlmProvider::default(), LlmProvider::Claude);
    }

    #[test]
    fn test_llm_provider_display_names() {
        assert_eq!(LlmProvider::Claude.display_name(), "Claude");
        assert_eq!(LlmProvider::OpenAi.display_name(), "OpenAI");
        assert_eq!(LlmProvider::Claude.to_string(), "claude");
        assert_eq!(LlmProvider::OpenAi.to_string(), "openai");
    }
}
