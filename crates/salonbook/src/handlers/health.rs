//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe (storage round-trip)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness probe.
///
/// Reads the salon table to check that storage answers.
/// Returns 200 if healthy, 503 if storage fails.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> Response {
    match state.salon_repo.list_salons().await {
        Ok(salons) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "healthy": true,
                "salons": salons.len()
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "healthy": false,
                    "error": e.to_string()
                })),
            )
                .into_response()
        }
    }
}
