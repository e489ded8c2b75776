//! HTTP surface of the meeting-notes API: routing, controllers and the typed
//! request/response shapes, plus server startup.

pub(crate) mod controller;
pub mod error;
pub(crate) mod params;
pub(crate) mod response;
pub mod router;


pub use error::{Error, Result};
use service::AppState;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use log::*;
use tower_http::cors::CorsLayer;

pub async fn init_server(app_state: AppState) -> Result<()> {
    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app_state.config.port;
    let server_url = format!("{host}:{port}");

    let mut allowed_origins = Vec::new();
    for origin in &app_state.config.allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(value) => allowed_origins.push(value),
            Err(err) => warn!("Skipping malformed allowed origin {origin}: {err:?}"),
        }
    }
    debug!("allowed_origins: {allowed_origins:?}");

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(allowed_origins);

    let router = router::define_routes(app_state).layer(cors_layer);

    let listener = tokio::net::TcpListener::bind(&server_url)
        .await
        .map_err(startup_error)?;
    info!("Server starting... listening for incoming connections on http://{server_url}");

    axum::serve(listener, router).await.map_err(startup_error)?;

    Ok(())
}

fn startup_error(err: std::io::Error) -> Error {
    error!("Server startup failed: {err:?}");
    Error(domain::error::Error {
        source: Some(Box::new(err)),
        error_kind: domain::error::DomainErrorKind::Internal(domain::error::InternalErrorKind::Io),
    })
}
