//! Command-line and environment configuration

use std::path::PathBuf;

use clap::Parser;
use skycast_core::{Coordinates, PLACEHOLDER_CITY};
use thiserror::Error;

use crate::api::{Units, DEFAULT_GEOCODING_URL, DEFAULT_GEOLOCATION_URL, DEFAULT_WEATHER_URL};

/// Skycast - current weather for any city, in your terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "skycast", version)]
#[command(about = "Search a city and see its current weather")]
pub struct Args {
    /// OpenWeather API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// City shown until your position is known
    #[arg(long, short, env = "SKYCAST_CITY", default_value = PLACEHOLDER_CITY)]
    pub city: String,

    /// Fixed latitude; skips the IP lookup (requires --lon)
    #[arg(long, env = "SKYCAST_LAT", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Fixed longitude; skips the IP lookup (requires --lat)
    #[arg(long, env = "SKYCAST_LON", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Measurement system
    #[arg(long, short, env = "SKYCAST_UNITS", value_enum, default_value_t = Units::Metric)]
    pub units: Units,

    /// Directory holding the background videos
    #[arg(long, env = "SKYCAST_ASSETS_DIR")]
    pub assets_dir: Option<PathBuf>,

    /// OpenWeather base URL
    #[arg(long, env = "SKYCAST_WEATHER_URL", default_value = DEFAULT_WEATHER_URL)]
    pub weather_url: String,

    /// Open-Meteo geocoding base URL
    #[arg(long, env = "SKYCAST_GEOCODING_URL", default_value = DEFAULT_GEOCODING_URL)]
    pub geocoding_url: String,

    /// IP geolocation base URL
    #[arg(long, env = "SKYCAST_GEOLOCATION_URL", default_value = DEFAULT_GEOLOCATION_URL)]
    pub geolocation_url: String,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long, env = "SKYCAST_LOG_FILE", default_value = "skycast.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing OpenWeather API key: pass --api-key or set OPENWEATHER_API_KEY")]
    MissingApiKey,

    #[error("--lat and --lon must be given together")]
    PartialCoordinates,

    #[error("coordinates out of range: {lat}, {lon}")]
    CoordinatesOutOfRange { lat: f64, lon: f64 },

    #[error("placeholder city must not be empty")]
    EmptyCity,
}

/// Validated settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub placeholder_city: String,
    /// Set when the position was given explicitly
    pub fixed_position: Option<Coordinates>,
    pub units: Units,
    pub assets_dir: Option<PathBuf>,
    pub weather_url: String,
    pub geocoding_url: String,
    pub geolocation_url: String,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let api_key = args
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let placeholder_city = args.city.trim().to_string();
        if placeholder_city.is_empty() {
            return Err(ConfigError::EmptyCity);
        }

        let fixed_position = match (args.lat, args.lon) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                    return Err(ConfigError::CoordinatesOutOfRange { lat, lon });
                }
                Some(Coordinates::new(lat, lon))
            }
            (None, None) => None,
            _ => return Err(ConfigError::PartialCoordinates),
        };

        Ok(Self {
            api_key,
            placeholder_city,
            fixed_position,
            units: args.units,
            assets_dir: args.assets_dir,
            weather_url: args.weather_url,
            geocoding_url: args.geocoding_url,
            geolocation_url: args.geolocation_url,
            log_file: args.log_file,
        })
    }
}
