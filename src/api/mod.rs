//! Dashboard HTTP Server
//!
//! Serves the server-rendered dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - The dashboard
//!
//! ## Dashboard
//! - `POST /api/v1/click/:node` - Drill down from a clicked ranking element
//! - `POST /api/v1/countries/:slug/select` - Drill down by country slug
//! - `GET /api/v1/summary` - Last summary outcome
//! - `POST /api/v1/summary/refresh` - Reload the summary
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use covid_board::api::{serve, AppState};
//! use covid_board::config::ServerConfig;
//! use std::sync::Arc;
//!
//! let state = AppState::new(Arc::new(dashboard));
//! serve(state, &ServerConfig::default()).await?;
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, PageDashboard};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/click/:node", post(routes::dashboard::click))
        .route("/countries/:slug/select", post(routes::dashboard::select_country))
        .route("/summary", get(routes::dashboard::get_summary))
        .route("/summary/refresh", post(routes::dashboard::refresh_summary));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the HTTP server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::SvgChartRenderer;
    use crate::covid::{CountryDailyRecord, CountryTotals, CovidStatus, GlobalSummary};
    use crate::dashboard::testing::{page, MockApi};
    use crate::dashboard::{Dashboard, DashboardSettings};
    use crate::dom::Dom;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;
    use tower::util::ServiceExt;

    fn mock_api() -> MockApi {
        let date = Utc.with_ymd_and_hms(2021, 1, 3, 0, 0, 0).unwrap();
        let mut series = HashMap::new();
        series.insert(
            ("b".to_string(), CovidStatus::Deaths),
            vec![CountryDailyRecord {
                deaths: 9,
                ..CountryDailyRecord::on(date)
            }],
        );

        MockApi {
            summary: Some(GlobalSummary {
                countries: vec![
                    CountryTotals::new("A", "a").confirmed(100),
                    CountryTotals::new("B", "b").confirmed(500),
                ],
                date,
                global: None,
                message: String::new(),
            }),
            series,
            ..Default::default()
        }
    }

    async fn create_test_app(load: bool) -> (Router, Arc<PageDashboard>) {
        let dashboard = Arc::new(
            Dashboard::new(
                Arc::new(mock_api()),
                page(),
                SvgChartRenderer::default(),
                DashboardSettings::default(),
            )
            .unwrap(),
        );
        if load {
            dashboard.summary().load_summary().await.unwrap();
        }

        let router = build_router(AppState::new(Arc::clone(&dashboard)));
        (router, dashboard)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _) = create_test_app(false).await;
        let response = app.oneshot(get("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_reports_summary_state() {
        let (app, _) = create_test_app(false).await;
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["summary_loaded"], false);
    }

    #[tokio::test]
    async fn test_index_renders_ranking() {
        let (app, _) = create_test_app(true).await;
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        let b = html.find("id=\"b\"").unwrap();
        let a = html.find("id=\"a\"").unwrap();
        assert!(b < a);
        assert!(html.contains(">600</span>"));
    }

    #[tokio::test]
    async fn test_summary_endpoints() {
        let (app, _) = create_test_app(false).await;
        let response = app.clone().oneshot(get("/api/v1/summary")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.clone().oneshot(post("/api/v1/summary/refresh")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/api/v1/summary")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["world"]["confirmed"], 600);
        assert_eq!(body["countries"], 2);
    }

    #[tokio::test]
    async fn test_select_country() {
        let (app, dashboard) = create_test_app(true).await;
        let response = app.oneshot(post("/api/v1/countries/b/select")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["outcome"], "rendered");
        assert_eq!(body["deaths_total"], 9);

        let view = dashboard.view().lock().await;
        assert_eq!(view.dom.text(dashboard.elements().deaths_total), Some("9"));
    }

    #[tokio::test]
    async fn test_click_on_ranking_item() {
        let (app, dashboard) = create_test_app(true).await;
        let span = {
            let view = dashboard.view().lock().await;
            let first = view.dom.children(dashboard.elements().rank_list)[0];
            view.dom.children(first)[0]
        };

        let response = app
            .clone()
            .oneshot(post(&format!("/api/v1/click/{}", span)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["country"], "b");

        let rank_list = dashboard.elements().rank_list;
        let response = app
            .oneshot(post(&format!("/api/v1/click/{}", rank_list)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_refresh_failure_is_bad_gateway() {
        let dashboard = Arc::new(
            Dashboard::new(
                Arc::new(MockApi::default()),
                page(),
                SvgChartRenderer::default(),
                DashboardSettings::default(),
            )
            .unwrap(),
        );
        let app = build_router(AppState::new(dashboard));

        let response = app.oneshot(post("/api/v1/summary/refresh")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }
}
