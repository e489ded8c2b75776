//! Response body types serialized by the API controllers.

use serde::Serialize;
use utoipa::ToSchema;

pub(crate) mod meeting;

/// Uniform error envelope returned for every failed request.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body for clients that log payloads.
    pub status_code: u16,
    /// Client-safe description of what went wrong.
    pub error: String,
}
