use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState, HealthResponse};

/// `GET /`
pub async fn welcome() -> &'static str {
    "Welcome to the Movies API!"
}

/// `GET /health`
///
/// Readiness probe backed by a store round trip.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::Unavailable(format!("database ping failed: {e}")))?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
