//! Router construction and server startup.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use archocr_core::models::config::{ArchocrConfig, ServerConfig};
use archocr_core::{ArchocrError, Result};

use crate::handlers::{
    export_handler, extract_handler, health_handler, root_handler, upload_handler,
};
use crate::types::AppState;

/// Build the API router.
///
/// Routes:
/// - `GET /` liveness message
/// - `GET /health` health check
/// - `POST /upload` recognize an image (multipart `file`)
/// - `POST /export` render form field `text` as DOCX
/// - `POST /extract` extract entities from JSON `{"text": ...}`
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/upload", post(upload_handler))
        .route("/export", post(export_handler))
        .route("/extract", post(extract_handler))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", s);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!("No valid CORS origins configured, allowing all origins");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} allowed origin(s)", origins.len());
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server and run until Ctrl-C.
pub async fn serve(config: &ArchocrConfig) -> Result<()> {
    let state = AppState::from_config(config)?;

    if !state.processor.engine().is_available() {
        tracing::warn!(
            "OCR engine '{}' is not available, /upload will fail until it is installed",
            state.processor.engine().name()
        );
    }

    let app = create_router(state, &config.server);
    let addr = (config.server.host.as_str(), config.server.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!("Starting archocr API server on http://{}", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ArchocrError::Io)?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
