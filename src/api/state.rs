//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::chart::SvgChartRenderer;
use crate::dashboard::Dashboard;
use crate::dom::Document;

/// The dashboard as served over HTTP
pub type PageDashboard = Dashboard<Document, SvgChartRenderer>;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Dashboard components and the page they render into
    pub dashboard: Arc<PageDashboard>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dashboard: Arc<PageDashboard>) -> Self {
        Self {
            dashboard,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
