//! Speech-to-text transcription of stored audio files.

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use crate::gateway::openai::{OpenAiClient, TranscriptionRequest};
use crate::upload::StoredAudio;
use log::*;
use service::config::Config;

/// Transcribe a stored audio file and return the transcript text.
///
/// The client is constructed first so a missing API key fails before any
/// file I/O happens.
pub async fn transcribe(config: &Config, audio: &StoredAudio) -> Result<String, Error> {
    let client = OpenAiClient::new(config)?;

    let bytes = tokio::fs::read(&audio.path).await.map_err(|e| {
        error!("Failed to read audio file {:?}: {e:?}", audio.path);
        Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Io),
        }
    })?;

    debug!(
        "Transcribing {} ({} bytes) with model {}",
        audio.stored_filename,
        bytes.len(),
        config.whisper_model
    );

    let response = client
        .create_transcription(TranscriptionRequest {
            file_name: audio.stored_filename.clone(),
            content_type: audio.content_type().to_string(),
            audio: bytes,
            model: config.whisper_model.clone(),
        })
        .await?;

    Ok(response.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorKind;
    use clap::Parser;
    use std::io::Write;

    fn test_config(base_url: &str, upload_dir: &str) -> Config {
        Config::parse_from([
            "meeting_notes_api",
            "--upload-dir",
            upload_dir,
            "--whisper-model",
            "whisper-1",
        ])
        .set_openai_base_url(base_url.to_string())
        .set_openai_api_key(Some("test-key".to_string()))
    }

    fn stored_audio_in(dir: &std::path::Path) -> StoredAudio {
        let path = dir.join("abc123.mp3");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"fake mp3 bytes").unwrap();

        StoredAudio {
            original_filename: "standup.mp3".to_string(),
            stored_filename: "abc123.mp3".to_string(),
            path,
            extension: ".mp3".to_string(),
            size_bytes: 14,
        }
    }

    #[tokio::test]
    async fn test_transcribe_returns_text() {
        let mut server = mockito::Server::new_async().await;
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(&server.url(), tmp.path().to_str().unwrap());
        let audio = stored_audio_in(tmp.path());

        let mock = server
            .mock("POST", "/audio/transcriptions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::Regex("whisper-1".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"text": "We agreed to ship on Friday."}"#)
            .create_async()
            .await;

        let transcript = transcribe(&config, &audio).await.unwrap();

        mock.assert_async().await;
        assert_eq!(transcript, "We agreed to ship on Friday.");
    }

    #[tokio::test]
    async fn test_transcribe_quota_exceeded() {
        let mut server = mockito::Server::new_async().await;
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(&server.url(), tmp.path().to_str().unwrap());
        let audio = stored_audio_in(tmp.path());

        let _mock = server
            .mock("POST", "/audio/transcriptions")
            .with_status(429)
            .with_body(r#"{"error": {"message": "insufficient_quota"}}"#)
            .create_async()
            .await;

        let err = transcribe(&config, &audio).await.unwrap_err();

        match err.error_kind {
            DomainErrorKind::Provider(kind) => assert_eq!(
                kind.to_string(),
                "OpenAI API quota exceeded. Please check billing configuration."
            ),
            other => panic!("Expected a provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transcribe_missing_api_key_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(&server.url(), tmp.path().to_str().unwrap())
            .set_openai_api_key(None);
        let audio = stored_audio_in(tmp.path());

        let mock = server
            .mock("POST", "/audio/transcriptions")
            .expect(0)
            .create_async()
            .await;

        let err = transcribe(&config, &audio).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Provider(ProviderErrorKind::MissingCredential {
                env_var: "OPENAI_API_KEY".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_transcribe_missing_file_is_internal_error() {
        let server = mockito::Server::new_async().await;
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(&server.url(), tmp.path().to_str().unwrap());

        let audio = StoredAudio {
            original_filename: "gone.mp3".to_string(),
            stored_filename: "gone.mp3".to_string(),
            path: tmp.path().join("gone.mp3"),
            extension: ".mp3".to_string(),
            size_bytes: 0,
        };

        let err = transcribe(&config, &audio).await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Io)
        );
    }
}
