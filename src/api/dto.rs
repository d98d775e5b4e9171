//! Response bodies

use serde::Serialize;

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or degraded
    pub status: String,
    /// Whether a summary has been rendered since startup
    pub summary_loaded: bool,
    /// Whether a drill-down is in flight
    pub drilldown_loading: bool,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
