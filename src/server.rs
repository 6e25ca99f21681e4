//! HTTP API: exposes generation as a JSON endpoint for the browser front-end.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::generation::{GenerateRequestBody, GenerationError, GenerationService};

pub type AppState = Arc<GenerationService>;

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider_configured: bool,
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (
            status,
            Json(ErrorResponse {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}

/// Default cap on request bodies. Source images arrive inline as data URLs,
/// so this has to fit a base64-encoded photo.
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Build the router with the default body limit.
pub fn router(service: GenerationService) -> Router {
    router_with_body_limit(service, DEFAULT_MAX_BODY_BYTES)
}

/// Build the router. Split out from [`serve`] so tests can drive it directly.
pub fn router_with_body_limit(service: GenerationService, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate", post(generate))
        .with_state(Arc::new(service))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(
    addr: SocketAddr,
    service: GenerationService,
    max_body_bytes: usize,
) -> std::io::Result<()> {
    if !service.is_configured() {
        log::warn!("No fal.ai credential configured; generation requests will fail");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!(
        "fal-studio API listening on http://{} (body limit {} bytes)",
        listener.local_addr()?,
        max_body_bytes
    );
    axum::serve(listener, router_with_body_limit(service, max_body_bytes)).await
}

async fn health(State(service): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        provider_configured: service.is_configured(),
    })
}

async fn generate(
    State(service): State<AppState>,
    payload: Result<Json<GenerateRequestBody>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            log::warn!("Rejected oversized request body: {}", rejection.body_text());
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse {
                    error: "Request body too large".to_string(),
                }),
            )
                .into_response();
        }
        Err(rejection) => {
            log::debug!("Rejected request body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid request body: {}", rejection.body_text()),
                }),
            )
                .into_response();
        }
    };

    match service.generate(body).await {
        Ok(url) => Json(GenerateResponse { result: url }).into_response(),
        Err(e) => {
            if e.is_client_error() {
                log::info!("Rejected generation request: {}", e);
            } else {
                log::error!("Generation failed: {}", e);
            }
            e.into_response()
        }
    }
}
