//! Validation and storage for uploaded audio files.
//!
//! Uploads are rejected before anything touches the filesystem. Accepted
//! files are stored under a generated name; the client-supplied filename is
//! kept only for reference and never used as a path.

use crate::error::{DomainErrorKind, Error, InternalErrorKind, ValidationErrorKind};
use log::*;
use service::config::Config;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// An uploaded audio file persisted to the upload directory.
#[derive(Debug, Clone)]
pub struct StoredAudio {
    /// Filename as supplied by the client.
    pub original_filename: String,
    /// Generated collision-free name the file is stored under.
    pub stored_filename: String,
    /// Full path of the stored file.
    pub path: PathBuf,
    /// Lowercased extension including the leading dot, e.g. ".mp3".
    pub extension: String,
    pub size_bytes: u64,
}

impl StoredAudio {
    /// MIME type matching the stored extension, for the transcription upload.
    pub fn content_type(&self) -> &'static str {
        match self.extension.as_str() {
            ".mp3" => "audio/mpeg",
            ".wav" => "audio/wav",
            ".m4a" => "audio/mp4",
            _ => "application/octet-stream",
        }
    }
}

/// Validates an uploaded payload and persists it to the upload directory.
///
/// Checks run in order: filename present, extension allowed, payload
/// non-empty, payload within the size ceiling. The ceiling is enforced on
/// the bytes actually received, not a client-declared length. Nothing is
/// written unless every check passes.
pub async fn store(
    config: &Config,
    original_filename: Option<&str>,
    payload: &[u8],
) -> Result<StoredAudio, Error> {
    let original_filename = match original_filename {
        Some(name) if !name.is_empty() => name,
        _ => {
            warn!("Upload rejected: no filename supplied");
            return Err(Error::validation(ValidationErrorKind::MissingFilename));
        }
    };

    let extension = file_extension(original_filename);
    if !config
        .allowed_audio_extensions
        .iter()
        .any(|allowed| allowed == &extension)
    {
        warn!("Upload rejected: unsupported extension {extension:?}");
        return Err(Error::validation(ValidationErrorKind::UnsupportedType {
            extension,
            allowed: config.allowed_audio_extensions.clone(),
        }));
    }

    if payload.is_empty() {
        warn!("Upload rejected: empty payload for {original_filename}");
        return Err(Error::validation(ValidationErrorKind::EmptyFile));
    }

    let size_bytes = payload.len() as u64;
    let max_bytes = config.max_audio_size_bytes();
    if size_bytes > max_bytes {
        warn!("Upload rejected: {size_bytes} bytes exceeds the {max_bytes} byte ceiling");
        return Err(Error::validation(ValidationErrorKind::FileTooLarge {
            size_bytes,
            max_bytes,
        }));
    }

    let stored_filename = generate_stored_filename(&extension);
    let upload_dir = PathBuf::from(&config.upload_dir);
    let path = upload_dir.join(&stored_filename);

    tokio::fs::create_dir_all(&upload_dir)
        .await
        .map_err(|e| io_error("create upload directory", e))?;

    // Write to a temp name and rename, so a crash mid-write never leaves a
    // partial file under a name the pipeline could pick up.
    let part_path = upload_dir.join(format!("{stored_filename}.part"));
    tokio::fs::write(&part_path, payload)
        .await
        .map_err(|e| io_error("write uploaded file", e))?;
    tokio::fs::rename(&part_path, &path)
        .await
        .map_err(|e| io_error("finalize uploaded file", e))?;

    debug!("Saved uploaded file as {stored_filename} ({size_bytes} bytes)");

    Ok(StoredAudio {
        original_filename: original_filename.to_string(),
        stored_filename,
        path,
        extension,
        size_bytes,
    })
}

/// Lowercased extension of `filename` including the leading dot, or an empty
/// string when there is none.
fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn generate_stored_filename(extension: &str) -> String {
    format!("{}{}", Uuid::new_v4().simple(), extension)
}

fn io_error(context: &str, e: std::io::Error) -> Error {
    error!("Failed to {context}: {e:?}");
    Error {
        source: Some(Box::new(e)),
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Io),
    }
}
