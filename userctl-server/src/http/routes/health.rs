//! Liveness endpoints
//!
//! `/` probes the database as well; `/health` only answers for the process.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Root liveness response
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub message: &'static str,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET / - server liveness plus database probe
async fn liveness(State(state): State<Arc<AppState>>) -> (StatusCode, Json<LivenessResponse>) {
    match state.users.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(LivenessResponse {
                message: "Server running",
                database: "connected",
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Database probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LivenessResponse {
                    message: "Server running",
                    database: "disconnected",
                    error: Some("database_unavailable"),
                }),
            )
        }
    }
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health))
}
