//! # Covid Board
//!
//! A COVID-19 statistics dashboard: world totals, a country ranking by
//! confirmed cases, and per-country drill-downs with a two-week chart.
//!
//! ## Modules
//!
//! - [`covid`]: Typed client for the statistics API
//! - [`dom`]: Element tree the dashboard renders into
//! - [`chart`]: Line chart renderer
//! - [`dashboard`]: Summary loader and country drill-down controller
//! - [`api`]: HTTP server for the rendered page, built with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covid_board::chart::SvgChartRenderer;
//! use covid_board::covid::{CovidClient, CovidClientConfig};
//! use covid_board::dashboard::{build_layout, Dashboard, DashboardSettings};
//! use covid_board::dom::Document;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Arc::new(CovidClient::new(CovidClientConfig::default())?);
//!
//!     let mut page = Document::new();
//!     let body = page.body();
//!     build_layout(&mut page, body);
//!
//!     let dashboard = Dashboard::new(
//!         api,
//!         page,
//!         SvgChartRenderer::default(),
//!         DashboardSettings::default(),
//!     )?;
//!
//!     let summary = dashboard.summary().load_summary().await?;
//!     println!("{} countries, {} confirmed", summary.countries, summary.world.confirmed);
//!
//!     dashboard.drilldown().on_country_selected("south-korea").await?;
//!     Ok(())
//! }
//! ```

pub mod address_book;
pub mod api;
pub mod chart;
pub mod config;
pub mod covid;
pub mod dashboard;
pub mod dom;
pub mod format;
pub mod logging;
pub mod users;

pub use api::{build_router, serve, ApiError, AppState, PageDashboard};

pub use chart::{ChartRenderer, ChartStyle, LineChart, SvgChartRenderer};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig};

pub use covid::{
    CountryDailyRecord, CountryTotals, CovidApi, CovidClient, CovidClientConfig, CovidStatus,
    FetchError, GlobalSummary,
};

pub use dashboard::{
    CountryDrillDownController, Dashboard, DashboardError, DashboardSettings, DrillDownOutcome,
    SummaryLoader, SummaryOutcome,
};

pub use dom::{Document, Dom, NodeId};

pub use format::Locale;
