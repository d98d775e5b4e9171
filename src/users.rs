//! Placeholder user lookup
//!
//! Fetches a user profile from a JSONPlaceholder-style API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::covid::{get_json, FetchError, FetchResult};

/// Configuration for the placeholder client
#[derive(Debug, Clone)]
pub struct PlaceholderConfig {
    /// Base URL (e.g., "https://jsonplaceholder.typicode.com")
    pub base_url: String,
    pub request_timeout_ms: u64,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub username: String,
    pub email: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Address {
    pub street: String,
    #[serde(default)]
    pub suite: String,
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub geo: Option<Geo>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

pub struct PlaceholderClient {
    client: Client,
    config: PlaceholderConfig,
}

impl PlaceholderClient {
    pub fn new(config: PlaceholderConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(FetchError::Request)?;

        Ok(Self { client, config })
    }

    fn user_url(&self, id: u64) -> String {
        format!("{}/users/{}", self.config.base_url.trim_end_matches('/'), id)
    }

    /// Fetch one user by id
    pub async fn fetch_user(&self, id: u64) -> FetchResult<User> {
        let user: User = get_json(&self.client, &self.user_url(id)).await?;
        tracing::debug!(id = user.id, name = %user.name, "Fetched user");
        Ok(user)
    }
}
