use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{BaseSearchService, SearchItem};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Google Custom Search JSON API client
pub struct GoogleSearchClient {
    api_key: String,
    engine_id: String,
    base_url: String,
    client: reqwest::Client,
}

/// Custom Search request parameters
#[derive(Debug, Serialize)]
struct CustomSearchRequest<'a> {
    key: &'a str,
    cx: &'a str,
    q: &'a str,
    start: u32,
    num: u32,
}

/// Custom Search response. `items` is omitted once results run out.
#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Option<Vec<SearchItem>>,
}

impl GoogleSearchClient {
    /// Create a new client. Every request is bounded by `timeout`.
    pub fn new(api_key: String, engine_id: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            api_key,
            engine_id,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    /// Point the client at a different endpoint (used against stub servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl BaseSearchService for GoogleSearchClient {
    async fn search_page(&self, query: &str, start: u32, num: u32) -> Result<Vec<SearchItem>> {
        let request = CustomSearchRequest {
            key: &self.api_key,
            cx: &self.engine_id,
            q: query,
            start,
            num,
        };

        let response = self
            .client
            .get(&self.base_url)
            .query(&request)
            .send()
            .await
            .context("Failed to send search request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Search API error {}: {}", status, body);
        }

        let search_response: CustomSearchResponse = response
            .json()
            .await
            .context("Failed to parse search response")?;

        let items = search_response.items.unwrap_or_default();
        tracing::debug!(query, start, items = items.len(), "Search page fetched");

        Ok(items)
    }
}
