//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer.
/// The `source` field is used to hold the original error that caused
/// the domain error. The intent is to translate errors between layers while maintaining
/// layer boundaries: `web` decides HTTP status codes from the `error_kind` alone and
/// never inspects provider internals. Each kind carries the data needed to render the
/// client-facing message; anything beyond that stays in `source` for server-side logs.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// The request itself is unacceptable. Maps to 400.
    Validation(ValidationErrorKind),
    /// An external AI provider call failed. Maps to 503.
    Provider(ProviderErrorKind),
    /// Everything else. Maps to 500.
    Internal(InternalErrorKind),
}

/// Rejections raised while validating an uploaded audio file.
#[derive(Debug, PartialEq)]
pub enum ValidationErrorKind {
    MissingFilename,
    EmptyFile,
    UnsupportedType {
        extension: String,
        allowed: Vec<String>,
    },
    FileTooLarge {
        size_bytes: u64,
        max_bytes: u64,
    },
    /// Shape violations in client-supplied summary data.
    Invalid(String),
}

/// Failures from the external transcription/summarization providers, reduced
/// to the categories a caller can act on. `provider` is the display name
/// ("OpenAI" or "Claude") embedded in the client-facing message.
#[derive(Debug, PartialEq)]
pub enum ProviderErrorKind {
    /// The API key env var is not configured. Detected before any network call.
    MissingCredential { env_var: String },
    QuotaExceeded { provider: String },
    AuthenticationFailed { provider: String },
    Connection { provider: String },
    RequestFailed { provider: String },
    /// The model responded, but not with the structured output we asked for.
    MalformedOutput { detail: String },
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Io,
    Config,
    Other(String),
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationErrorKind::MissingFilename => write!(f, "Missing filename"),
            ValidationErrorKind::EmptyFile => write!(f, "Empty file"),
            ValidationErrorKind::UnsupportedType { extension, allowed } => {
                write!(
                    f,
                    "Unsupported file type: {}. Allowed: {}",
                    extension,
                    allowed.join(", ")
                )
            }
            ValidationErrorKind::FileTooLarge {
                size_bytes,
                max_bytes,
            } => {
                let size_mb = *size_bytes as f64 / (1024.0 * 1024.0);
                let max_mb = max_bytes / (1024 * 1024);
                write!(
                    f,
                    "Audio file is too large ({size_mb:.1} MB). Maximum supported size is \
                     {max_mb} MB. Please upload a shorter file or convert it to MP3/WAV."
                )
            }
            ValidationErrorKind::Invalid(detail) => write!(f, "{detail}"),
        }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProviderErrorKind::MissingCredential { env_var } => {
                write!(f, "{env_var} is missing. Set it in the environment or .env")
            }
            ProviderErrorKind::QuotaExceeded { provider } => {
                write!(
                    f,
                    "{provider} API quota exceeded. Please check billing configuration."
                )
            }
            ProviderErrorKind::AuthenticationFailed { provider } => {
                write!(
                    f,
                    "{provider} authentication failed. Please verify the API key."
                )
            }
            ProviderErrorKind::Connection { provider } => {
                write!(
                    f,
                    "Failed to connect to {provider}. Please check your network connection."
                )
            }
            ProviderErrorKind::RequestFailed { provider } => {
                write!(
                    f,
                    "{provider} request failed. Please try again or adjust the prompt/input."
                )
            }
            ProviderErrorKind::MalformedOutput { detail } => write!(f, "{detail}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl Error {
    pub fn validation(kind: ValidationErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Validation(kind),
        }
    }

    pub fn provider(kind: ProviderErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Provider(kind),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(detail.into())),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself. Gateways
        // normally map these themselves to attach the provider name.
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Provider(ProviderErrorKind::Connection {
                    provider: "the provider".to_string(),
                }),
            }
        }
    }
}
