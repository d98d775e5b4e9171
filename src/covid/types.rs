//! COVID API data types
//!
//! Mirrors the JSON documents returned by the summary and live-country
//! endpoints. Field names on the wire are PascalCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Response of `GET /summary`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalSummary {
    /// Per-country cumulative totals, in API order
    #[serde(default)]
    pub countries: Vec<CountryTotals>,
    /// When the summary was produced
    pub date: DateTime<Utc>,
    /// World totals as reported by the API (not used for display)
    #[serde(default)]
    pub global: Option<GlobalTotals>,
    #[serde(default)]
    pub message: String,
}

/// Cumulative totals for one country
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountryTotals {
    pub country: String,
    #[serde(default)]
    pub country_code: String,
    /// URL-safe identifier, also used as the ranking item's element id
    pub slug: String,
    pub total_confirmed: u64,
    pub total_deaths: u64,
    pub total_recovered: u64,
    #[serde(default)]
    pub new_confirmed: u64,
    #[serde(default)]
    pub new_deaths: u64,
    #[serde(default)]
    pub new_recovered: u64,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl CountryTotals {
    /// Build a minimal record, mostly useful for tests and fixtures
    pub fn new(country: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            country_code: String::new(),
            slug: slug.into(),
            total_confirmed: 0,
            total_deaths: 0,
            total_recovered: 0,
            new_confirmed: 0,
            new_deaths: 0,
            new_recovered: 0,
            date: None,
        }
    }

    pub fn confirmed(mut self, n: u64) -> Self {
        self.total_confirmed = n;
        self
    }

    pub fn deaths(mut self, n: u64) -> Self {
        self.total_deaths = n;
        self
    }

    pub fn recovered(mut self, n: u64) -> Self {
        self.total_recovered = n;
        self
    }
}

/// World totals block of the summary response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalTotals {
    #[serde(default)]
    pub new_confirmed: u64,
    #[serde(default)]
    pub new_deaths: u64,
    #[serde(default)]
    pub new_recovered: u64,
    pub total_confirmed: u64,
    pub total_deaths: u64,
    pub total_recovered: u64,
}

/// One day of a per-country live series
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountryDailyRecord {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub city_code: String,
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lon: String,
    #[serde(default)]
    pub confirmed: u64,
    #[serde(default)]
    pub deaths: u64,
    #[serde(default)]
    pub recovered: u64,
    /// Can go negative in upstream data when recoveries are revised
    #[serde(default)]
    pub active: i64,
    pub date: DateTime<Utc>,
}

impl CountryDailyRecord {
    /// Build a record for a given day with all counts zeroed
    pub fn on(date: DateTime<Utc>) -> Self {
        Self {
            country: String::new(),
            country_code: String::new(),
            province: String::new(),
            city: String::new(),
            city_code: String::new(),
            lat: String::new(),
            lon: String::new(),
            confirmed: 0,
            deaths: 0,
            recovered: 0,
            active: 0,
            date,
        }
    }
}

/// Live series a per-country query can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CovidStatus {
    Confirmed,
    Recovered,
    Deaths,
}

impl CovidStatus {
    /// Path segment used by the live-country endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            CovidStatus::Confirmed => "confirmed",
            CovidStatus::Recovered => "recovered",
            CovidStatus::Deaths => "deaths",
        }
    }
}

impl fmt::Display for CovidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
