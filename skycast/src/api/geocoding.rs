//! City search backed by the Open-Meteo geocoding API

use reqwest::Client;
use serde::Deserialize;
use skycast_core::{Candidate, Coordinates};

use super::{http_client, trim_base, ApiError};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";

/// Suggestions requested per keystroke
pub const SEARCH_RESULT_COUNT: usize = 8;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Absent when nothing matches
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country_code: Option<String>,
}

/// Client for `/v1/search`
#[derive(Debug, Clone)]
pub struct CitySearchClient {
    client: Client,
    base_url: String,
    count: usize,
}

impl CitySearchClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client: http_client()?,
            base_url: trim_base(base_url),
            count: SEARCH_RESULT_COUNT,
        })
    }

    /// Limit the number of suggestions
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Ranked candidates for a prefix, in the service's order.
    ///
    /// Entries without a country code are skipped since they cannot form a pair.
    pub async fn search(&self, prefix: &str) -> Result<Vec<Candidate>, ApiError> {
        let name = prefix.trim();
        if name.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/v1/search?name={}&count={}&language=en&format=json",
            self.base_url,
            urlencoding::encode(name),
            self.count
        );
        tracing::debug!(prefix = name, "Searching cities");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(data
            .results
            .into_iter()
            .filter_map(|r| {
                let country_code = r.country_code.filter(|cc| !cc.is_empty())?;
                Some(Candidate::new(
                    r.name,
                    country_code,
                    Coordinates::new(r.latitude, r.longitude),
                ))
            })
            .collect())
    }
}
