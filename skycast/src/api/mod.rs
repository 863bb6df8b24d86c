//! HTTP clients for the three external services
//!
//! - [`OpenWeatherClient`]: current conditions by city/country or coordinates
//! - [`CitySearchClient`]: ranked city suggestions for a typed prefix
//! - [`Geolocator`]: one-shot position lookup
//!
//! Every client takes its base URL so tests can point it at a mock server.

mod geocoding;
mod geolocation;
mod openweather;

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

pub use geocoding::{CitySearchClient, DEFAULT_GEOCODING_URL, SEARCH_RESULT_COUNT};
pub use geolocation::{Geolocator, DEFAULT_GEOLOCATION_URL};
pub use openweather::{OpenWeatherClient, Units, DEFAULT_WEATHER_URL};

/// Per-request timeout for every service
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

/// Transport-level failure talking to a service
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Shared client settings
pub(crate) fn http_client() -> Result<Client, ApiError> {
    Ok(Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?)
}

/// Base URL without a trailing slash
pub(crate) fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_base() {
        assert_eq!(trim_base("http://127.0.0.1:8080/"), "http://127.0.0.1:8080");
        assert_eq!(trim_base("https://api.example.com"), "https://api.example.com");
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "Unexpected status 502: bad gateway");
    }
}
