//! One-shot position lookup

use reqwest::Client;
use serde::Deserialize;
use skycast_core::Coordinates;

use super::{http_client, trim_base, ApiError};

pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Where the device is
#[derive(Debug, Clone)]
pub enum Geolocator {
    /// Approximate position from the public IP address
    IpApi { client: Client, base_url: String },
    /// Position given on the command line
    Fixed(Coordinates),
}

impl Geolocator {
    pub fn ip_api(base_url: &str) -> Result<Self, ApiError> {
        Ok(Geolocator::IpApi {
            client: http_client()?,
            base_url: trim_base(base_url),
        })
    }

    pub fn fixed(coordinates: Coordinates) -> Self {
        Geolocator::Fixed(coordinates)
    }

    pub async fn locate(&self) -> Result<Coordinates, ApiError> {
        let (client, base_url) = match self {
            Geolocator::Fixed(coordinates) => return Ok(*coordinates),
            Geolocator::IpApi { client, base_url } => (client, base_url),
        };

        let url = format!("{base_url}/json/?fields=status,message,lat,lon");
        tracing::debug!("Looking up position from IP address");

        let response = client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        match (data.status.as_str(), data.lat, data.lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(ApiError::Unavailable(
                data.message.unwrap_or_else(|| "position not available".into()),
            )),
        }
    }
}
