//! COVID REST API Client
//!
//! HTTP client for the public COVID-19 statistics API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::{FetchError, FetchResult};
use super::types::{CountryDailyRecord, CovidStatus, GlobalSummary};

/// The reads the dashboard needs from the statistics API
#[async_trait]
pub trait CovidApi: Send + Sync {
    /// Fetch the global summary (all countries)
    async fn fetch_summary(&self) -> FetchResult<GlobalSummary>;

    /// Fetch one live series for a country
    async fn fetch_country_status(
        &self,
        slug: &str,
        status: CovidStatus,
    ) -> FetchResult<Vec<CountryDailyRecord>>;
}

/// Configuration for the COVID API client
#[derive(Debug, Clone)]
pub struct CovidClientConfig {
    /// Base URL (e.g., "https://api.covid19api.com")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for CovidClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.covid19api.com".to_string(),
            request_timeout_ms: 10_000,
            user_agent: format!("covid-board/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// reqwest-backed implementation of [`CovidApi`]
pub struct CovidClient {
    client: Client,
    config: CovidClientConfig,
}

impl CovidClient {
    /// Create a new client with the given configuration
    pub fn new(config: CovidClientConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Request)?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &CovidClientConfig {
        &self.config
    }

    fn summary_url(&self) -> String {
        format!("{}/summary", self.config.base_url.trim_end_matches('/'))
    }

    fn country_url(&self, slug: &str, status: CovidStatus) -> String {
        format!(
            "{}/live/country/{}/status/{}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(slug),
            status
        )
    }
}

#[async_trait]
impl CovidApi for CovidClient {
    async fn fetch_summary(&self) -> FetchResult<GlobalSummary> {
        get_json(&self.client, &self.summary_url()).await
    }

    async fn fetch_country_status(
        &self,
        slug: &str,
        status: CovidStatus,
    ) -> FetchResult<Vec<CountryDailyRecord>> {
        get_json(&self.client, &self.country_url(slug, status)).await
    }
}

/// GET a URL and decode its JSON body, mapping non-2xx to [`FetchError::Status`]
pub(crate) async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> FetchResult<T> {
    tracing::debug!(url = %url, "GET");

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(FetchError::Status {
            status: status.as_u16(),
            message: text,
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
}
