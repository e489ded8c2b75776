//! Anthropic Messages API client used for forced tool-call summarization.

use crate::error::{DomainErrorKind, Error, InternalErrorKind, ProviderErrorKind};
use crate::gateway::{client_builder, connection_error, error_for_status};
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;

pub(crate) const PROVIDER: &str = "Claude";

const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_BETA: &str = "structured-outputs-2025-11-13";

/// Request to the Messages endpoint with a forced tool call.
#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<Message>,
    pub tools: Vec<Tool>,
    pub tool_choice: ToolChoice,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct ToolChoice {
    #[serde(rename = "type")]
    pub choice_type: String,
    pub name: String,
}

/// Response from the Messages endpoint, reduced to the content blocks.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub input: Option<serde_json::Value>,
}

/// Anthropic API client
pub struct AnthropicClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnthropicClient {
    /// Create a new Anthropic client. Fails with a missing-credential error
    /// when no API key is configured, before any network call is made.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = build_client(config)?;

        Ok(Self {
            client,
            base_url: config.anthropic_base_url().to_string(),
        })
    }

    /// Send a message request and return the raw content blocks.
    pub async fn create_message(
        &self,
        request: MessagesRequest,
    ) -> Result<MessagesResponse, Error> {
        let url = format!("{}/messages", self.base_url);

        debug!("Requesting message completion with model {}", request.model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| connection_error(PROVIDER, e))?;

        if response.status().is_success() {
            response.json().await.map_err(|e| {
                warn!("Failed to parse messages response: {e:?}");
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::Provider(ProviderErrorKind::RequestFailed {
                        provider: PROVIDER.to_string(),
                    }),
                }
            })
        } else {
            Err(error_for_status(PROVIDER, response).await)
        }
    }
}

/// Build HTTP client with Anthropic API headers
fn build_client(config: &Config) -> Result<reqwest::Client, Error> {
    let headers = build_auth_headers(config)?;

    Ok(client_builder(config).default_headers(headers).build()?)
}

/// Build authentication and version headers for the Anthropic API
fn build_auth_headers(config: &Config) -> Result<reqwest::header::HeaderMap, Error> {
    let api_key = config.anthropic_api_key().ok_or_else(|| {
        warn!("Anthropic API key not configured");
        Error::provider(ProviderErrorKind::MissingCredential {
            env_var: "ANTHROPIC_API_KEY".to_string(),
        })
    })?;

    let mut headers = reqwest::header::HeaderMap::new();
    let mut key_header = reqwest::header::HeaderValue::from_str(&api_key).map_err(|err| {
        warn!("Failed to create API key header value: {err:?}");
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Failed to create API key header value".to_string(),
            )),
        }
    })?;
    key_header.set_sensitive(true);
    headers.insert("x-api-key", key_header);
    headers.insert(
        "anthropic-version",
        reqwest::header::HeaderValue::from_static(ANTHROPIC_VERSION),
    );
    headers.insert(
        "anthropic-beta",
        reqwest::header::HeaderValue::from_static(ANTHROPIC_BETA),
    );
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    Ok(headers)
}
