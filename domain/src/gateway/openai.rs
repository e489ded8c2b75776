//! OpenAI API client for Whisper transcription and schema-constrained
//! chat completions.

use crate::error::{DomainErrorKind, Error, InternalErrorKind, ProviderErrorKind};
use crate::gateway::{client_builder, connection_error, error_for_status};
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;

pub(crate) const PROVIDER: &str = "OpenAI";

/// Request to transcribe one audio file, sent as multipart form data.
#[derive(Debug)]
pub struct TranscriptionRequest {
    pub file_name: String,
    pub content_type: String,
    pub audio: Vec<u8>,
    pub model: String,
}

/// Response from the transcription endpoint.
#[derive(Debug, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

/// Request for a chat completion constrained to a JSON schema.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub schema: serde_json::Value,
}

/// Response from the chat completions endpoint, reduced to what we read.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// OpenAI API client
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Create a new OpenAI client. Fails with a missing-credential error when
    /// no API key is configured, before any network call is made.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = build_client(config)?;

        Ok(Self {
            client,
            base_url: config.openai_base_url().to_string(),
        })
    }

    /// Transcribe an audio file via the Whisper endpoint.
    pub async fn create_transcription(
        &self,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResponse, Error> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        debug!(
            "Requesting transcription of {} ({} bytes) with model {}",
            request.file_name,
            request.audio.len(),
            request.model
        );

        let part = reqwest::multipart::Part::bytes(request.audio)
            .file_name(request.file_name)
            .mime_str(&request.content_type)
            .map_err(|e| {
                warn!("Failed to build multipart file part: {e:?}");
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                        "Invalid content type for audio upload".to_string(),
                    )),
                }
            })?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", request.model);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| connection_error(PROVIDER, e))?;

        if response.status().is_success() {
            response.json().await.map_err(|e| {
                warn!("Failed to parse transcription response: {e:?}");
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

    /// Run a chat completion whose output is constrained to a JSON schema.
    pub async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, Error> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!("Requesting chat completion with model {}", request.model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| connection_error(PROVIDER, e))?;

        if response.status().is_success() {
            response.json().await.map_err(|e| {
                warn!("Failed to parse chat completion response: {e:?}");
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

/// Build HTTP client with OpenAI bearer authentication
fn build_client(config: &Config) -> Result<reqwest::Client, Error> {
    let headers = build_auth_headers(config)?;

    Ok(client_builder(config).default_headers(headers).build()?)
}

/// Build authentication headers for the OpenAI API
fn build_auth_headers(config: &Config) -> Result<reqwest::header::HeaderMap, Error> {
    let api_key = config.openai_api_key().ok_or_else(|| {
        warn!("OpenAI API key not configured");
        Error::provider(ProviderErrorKind::MissingCredential {
            env_var: "OPENAI_API_KEY".to_string(),
        })
    })?;

    let mut headers = reqwest::header::HeaderMap::new();
    let auth_value = format!("Bearer {}", api_key);
    let mut auth_header = reqwest::header::HeaderValue::from_str(&auth_value).map_err(|err| {
        warn!("Failed to create authorization header value: {err:?}");
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Failed to create authorization header value".to_string(),
            )),
        }
    })?;
    auth_header.set_sensitive(true);
    headers.insert(reqwest::header::AUTHORIZATION, auth_header);

    Ok(headers)
}
