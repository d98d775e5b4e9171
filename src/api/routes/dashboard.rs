//! Dashboard Routes
//!
//! - POST /api/v1/click/:node - Drill down into the ranking item containing a node
//! - POST /api/v1/countries/:slug/select - Drill down into a country by slug
//! - GET /api/v1/summary - Outcome of the last summary load
//! - POST /api/v1/summary/refresh - Re-run the summary load
//!
//! Drill-downs run on their own task so a dropped request cannot leave the
//! page half-rendered.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::{DrillDownOutcome, SummaryOutcome};
use crate::dom::NodeId;

/// POST /api/v1/click/:node
pub async fn click(
    State(state): State<Arc<AppState>>,
    Path(node): Path<usize>,
) -> ApiResult<Json<DrillDownOutcome>> {
    let dashboard = Arc::clone(&state.dashboard);
    let outcome = tokio::spawn(async move { dashboard.drilldown().on_click(NodeId(node)).await })
        .await
        .map_err(|e| ApiError::Internal(format!("Drill-down task failed: {}", e)))??;

    Ok(Json(outcome))
}

/// POST /api/v1/countries/:slug/select
pub async fn select_country(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<DrillDownOutcome>> {
    if slug.trim().is_empty() {
        return Err(ApiError::Validation("Country slug must not be empty".into()));
    }

    let dashboard = Arc::clone(&state.dashboard);
    let outcome =
        tokio::spawn(async move { dashboard.drilldown().on_country_selected(&slug).await })
            .await
            .map_err(|e| ApiError::Internal(format!("Drill-down task failed: {}", e)))??;

    Ok(Json(outcome))
}

/// GET /api/v1/summary
pub async fn get_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<SummaryOutcome>> {
    state
        .dashboard
        .summary()
        .last_outcome()
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No summary loaded yet".into()))
}

/// POST /api/v1/summary/refresh
pub async fn refresh_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SummaryOutcome>> {
    let outcome = state.dashboard.summary().load_summary().await?;
    Ok(Json(outcome))
}
