//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Degraded until the first summary load succeeds.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let summary_loaded = state.dashboard.summary().last_outcome().await.is_some();

    Json(HealthResponse {
        status: if summary_loaded { "healthy" } else { "degraded" }.to_string(),
        summary_loaded,
        drilldown_loading: state.dashboard.drilldown().is_loading(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
