//! HTTP clients for the external AI providers.
//!
//! Both clients funnel their failures through the helpers here so that a
//! quota, auth, or connectivity problem produces the same error shape and
//! message no matter which provider it came from.

pub mod anthropic;
pub mod openai;

use crate::error::{DomainErrorKind, Error, ProviderErrorKind};
use log::*;
use reqwest::StatusCode;
use service::config::Config;

/// Client builder with the TLS stack and the configured provider timeout
/// applied. Gateways add their own auth headers on top.
pub(crate) fn client_builder(config: &Config) -> reqwest::ClientBuilder {
    let mut builder = reqwest::Client::builder().use_rustls_tls();
    if let Some(secs) = config.provider_timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    builder
}

/// Maps a transport-level failure (connect, TLS, timeout) to the uniform
/// connectivity error for `provider`.
pub(crate) fn connection_error(provider: &str, err: reqwest::Error) -> Error {
    warn!("Failed to reach {provider}: {err:?}");
    Error {
        source: Some(Box::new(err)),
        error_kind: DomainErrorKind::Provider(ProviderErrorKind::Connection {
            provider: provider.to_string(),
        }),
    }
}

/// Maps a non-success HTTP status to the provider error category it belongs
/// to. Consumes the response to log its body server-side; the body never
/// reaches the client.
pub(crate) async fn error_for_status(provider: &str, response: reqwest::Response) -> Error {
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    error!("{provider} API returned {status}: {error_text}");

    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderErrorKind::AuthenticationFailed {
                provider: provider.to_string(),
            }
        }
        StatusCode::TOO_MANY_REQUESTS => ProviderErrorKind::QuotaExceeded {
            provider: provider.to_string(),
        },
        _ => ProviderErrorKind::RequestFailed {
            provider: provider.to_string(),
        },
    };

    Error {
        source: None,
        error_kind: DomainErrorKind::Provider(kind),
    }
}
