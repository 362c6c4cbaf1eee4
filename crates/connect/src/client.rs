//! HTTP client for the snapshot retrieval API.
//!
//! Implements the core's [`SnapshotProviderTrait`] over JSON-over-HTTP.
//! This client is strictly read-only: it never issues writes back to the
//! snapshot store.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use uniscope_core::errors::{ProviderError, Result};
use uniscope_core::universes::{SnapshotProviderTrait, TimelineQuery, TimelineResponse};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL for the snapshot retrieval service.
pub const DEFAULT_SNAPSHOT_API_URL: &str = "https://api.uniscope.app";

/// Client for the snapshot retrieval API.
pub struct SnapshotApiClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl SnapshotApiClient {
    /// Creates a client against the given base URL. `api_token`, when set,
    /// is sent as a bearer token on every request.
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            api_token,
        }
    }

    fn timeline_url(&self, universe_id: &str) -> String {
        format!(
            "{}/v1/universes/{}/timeline",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(universe_id)
        )
    }

    fn query_params(query: &TimelineQuery) -> Vec<(&'static str, String)> {
        vec![
            ("start_date", query.date_range.start_date.to_string()),
            ("end_date", query.date_range.end_date.to_string()),
            ("frequency", query.frequency.as_str().to_string()),
            (
                "show_empty_periods",
                query.show_empty_periods.to_string(),
            ),
            (
                "include_turnover_analysis",
                query.include_turnover_analysis.to_string(),
            ),
        ]
    }

    async fn fetch_timeline(
        &self,
        query: &TimelineQuery,
    ) -> std::result::Result<TimelineResponse, ProviderError> {
        let url = self.timeline_url(&query.universe_id);
        debug!("Fetching snapshot timeline: {}", url);

        let mut request = self.client.get(&url).query(&Self::query_params(query));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http { status, message });
        }

        response
            .json::<TimelineResponse>()
            .await
            .map_err(|e| ProviderError::Deserialization(e.to_string()))
    }
}

#[async_trait]
impl SnapshotProviderTrait for SnapshotApiClient {
    async fn get_timeline(&self, query: &TimelineQuery) -> Result<TimelineResponse> {
        Ok(self.fetch_timeline(query).await?)
    }
}
