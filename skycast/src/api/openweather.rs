//! OpenWeather current-conditions client

use std::fmt;

use reqwest::Client;
use serde::Deserialize;
use skycast_core::{Coordinates, WeatherOutcome, WeatherQuery, WeatherReport};

use super::{http_client, trim_base, ApiError};

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org";

/// Measurement system requested from the service
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Units {
    /// Celsius, metres per second
    #[default]
    Metric,
    /// Fahrenheit, miles per hour
    Imperial,
    /// Kelvin, metres per second
    Standard,
}

impl Units {
    /// Value of the `units` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub fn temperature_suffix(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => " K",
        }
    }

    pub fn speed_suffix(self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            Units::Metric | Units::Standard => "m/s",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// `cod` arrives as `200` on success and `"404"` on errors
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Code {
    Number(u16),
    Text(String),
}

impl Code {
    fn value(&self) -> Option<u16> {
        match self {
            Code::Number(n) => Some(*n),
            Code::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Fields present on every answer, success or not
#[derive(Debug, Deserialize)]
struct Envelope {
    cod: Code,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    #[serde(default)]
    name: String,
    coord: Coord,
    weather: Vec<Condition>,
    main: Main,
    #[serde(default)]
    wind: Wind,
    #[serde(default)]
    sys: Sys,
}

#[derive(Debug, Deserialize)]
struct Coord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: String,
    #[serde(default)]
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
    feels_like: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Default, Deserialize)]
struct Wind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct Sys {
    #[serde(default)]
    country: String,
}

impl CurrentWeather {
    fn into_report(self) -> Result<WeatherReport, ApiError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Decode("empty weather array".into()))?;

        Ok(WeatherReport {
            name: self.name,
            country: self.sys.country,
            coordinates: Coordinates::new(self.coord.lat, self.coord.lon),
            condition: condition.main,
            description: condition.description,
            icon: condition.icon,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
        })
    }
}

/// Client for `/data/2.5/weather`
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    units: Units,
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: impl Into<String>, units: Units) -> Result<Self, ApiError> {
        Ok(Self {
            client: http_client()?,
            base_url: trim_base(base_url),
            api_key: api_key.into(),
            units,
        })
    }

    /// Look up a city/country pair. An empty country code is left out of `q`.
    pub async fn by_name(
        &self,
        city: &str,
        country_code: &str,
    ) -> Result<WeatherOutcome, ApiError> {
        let q = if country_code.is_empty() {
            city.to_string()
        } else {
            format!("{city},{country_code}")
        };
        self.fetch(&format!("q={}", urlencoding::encode(&q))).await
    }

    pub async fn by_coordinates(
        &self,
        coordinates: Coordinates,
    ) -> Result<WeatherOutcome, ApiError> {
        self.fetch(&format!("lat={}&lon={}", coordinates.lat, coordinates.lon))
            .await
    }

    /// Dispatch on the query tag carried by an effect
    pub async fn fetch_query(&self, query: &WeatherQuery) -> Result<WeatherOutcome, ApiError> {
        match query {
            WeatherQuery::ByName { city, country_code } => self.by_name(city, country_code).await,
            WeatherQuery::ByCoordinates(coordinates) => self.by_coordinates(*coordinates).await,
        }
    }

    async fn fetch(&self, location: &str) -> Result<WeatherOutcome, ApiError> {
        let url = format!(
            "{}/data/2.5/weather?{}&units={}&appid={}",
            self.base_url,
            location,
            self.units.as_param(),
            urlencoding::encode(&self.api_key)
        );
        tracing::debug!(location, units = %self.units, "Fetching current weather");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        parse_body(status.as_u16(), &body)
    }
}

/// Interpret a response body. HTTP 404 with a `cod` body is a domain answer, not a transport error.
fn parse_body(status: u16, body: &str) -> Result<WeatherOutcome, ApiError> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if (200..300).contains(&status) => return Err(ApiError::Decode(e.to_string())),
        Err(_) => {
            return Err(ApiError::Status {
                status,
                body: body.chars().take(200).collect(),
            })
        }
    };

    let code = envelope
        .cod
        .value()
        .ok_or_else(|| ApiError::Decode("unreadable cod field".into()))?;

    if code != 200 {
        let message = envelope.message.unwrap_or_default();
        tracing::debug!(code, %message, "Weather service answered without data");
        return Ok(WeatherOutcome::NotFound { code, message });
    }

    let weather: CurrentWeather =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(WeatherOutcome::Found(weather.into_report()?))
}
