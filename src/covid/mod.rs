//! COVID Statistics API
//!
//! Typed access to the summary and live-country endpoints.
//!
//! ## Endpoints
//!
//! - `GET /summary` - per-country totals plus the time they were produced
//! - `GET /live/country/{slug}/status/{confirmed|recovered|deaths}` - daily series

mod client;
mod error;
mod types;

pub use client::{CovidApi, CovidClient, CovidClientConfig};
pub(crate) use client::get_json;
pub use error::{FetchError, FetchResult};
pub use types::{CountryDailyRecord, CountryTotals, CovidStatus, GlobalSummary, GlobalTotals};
