//! The Selection record - single source of truth
//!
//! Every field the UI renders lives here. Only the reducer mutates it;
//! components and the runtime read it through `&Selection`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assets::Asset;
use crate::error::Failure;

/// City shown before geolocation or the user picks anything.
pub const PLACEHOLDER_CITY: &str = "New York City";

/// A latitude/longitude pair in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl Default for Coordinates {
    /// Manhattan, matching the placeholder city.
    fn default() -> Self {
        Self {
            lat: 40.7128,
            lon: -74.006,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// A city/country suggestion from the search service, not yet confirmed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub city: String,
    pub country_code: String,
    pub coordinates: Coordinates,
}

impl Candidate {
    pub fn new(
        city: impl Into<String>,
        country_code: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            city: city.into(),
            country_code: country_code.into(),
            coordinates,
        }
    }

    /// Canonical `"<city>, <countryCode>"` text written back into the input.
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.country_code)
    }
}

/// Current conditions for one location, as returned by a successful lookup
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Resolved city name (reverse-geocoded for coordinate lookups)
    pub name: String,
    /// `sys.country`
    pub country: String,
    pub coordinates: Coordinates,
    /// `weather[0].main`, the asset table key
    pub condition: String,
    pub description: String,
    /// `weather[0].icon`, e.g. `"01d"`
    pub icon: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
}

/// What the Weather Service answered for one query
#[derive(Clone, Debug, PartialEq)]
pub enum WeatherOutcome {
    /// `cod == 200`
    Found(WeatherReport),
    /// Any other `cod`: unresolvable city/country pair, bad key, ...
    NotFound { code: u16, message: String },
}

impl WeatherOutcome {
    pub fn code(&self) -> u16 {
        match self {
            WeatherOutcome::Found(_) => 200,
            WeatherOutcome::NotFound { code, .. } => *code,
        }
    }
}

/// Tag attached to every outgoing weather request.
///
/// A response is applied only while its query is still the pending one.
#[derive(Clone, Debug, PartialEq)]
pub enum WeatherQuery {
    ByName { city: String, country_code: String },
    ByCoordinates(Coordinates),
}

impl WeatherQuery {
    pub fn by_name(city: impl Into<String>, country_code: impl Into<String>) -> Self {
        WeatherQuery::ByName {
            city: city.into(),
            country_code: country_code.into(),
        }
    }
}

impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherQuery::ByName { city, country_code } => write!(f, "q={},{}", city, country_code),
            WeatherQuery::ByCoordinates(c) => write!(f, "lat={} lon={}", c.lat, c.lon),
        }
    }
}

/// Which reconciliation state the selection is in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Placeholder city, nothing loaded yet
    Bootstrap,
    /// Waiting on the one-shot geolocation lookup
    Geolocating,
    /// A pair (or fresh coordinates) is known and a weather query is out
    Resolved,
    /// No city chosen, the user is typing
    Searching,
    /// Weather for the current pair has arrived
    Loaded,
    /// A transport failure halted normal rendering
    Failed,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Bootstrap => "bootstrap",
            Phase::Geolocating => "geolocating",
            Phase::Resolved => "resolved",
            Phase::Searching => "searching",
            Phase::Loaded => "loaded",
            Phase::Failed => "failed",
        }
    }
}

/// Everything the UI needs to render
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Empty means "no city chosen"
    pub city: String,
    pub country_code: String,
    /// Location of the last confirmed report, or the geolocation result before that
    pub coordinates: Coordinates,
    /// Raw text in the search field
    pub input_text: String,
    /// Dropdown contents; `None` hides the dropdown
    pub candidates: Option<Vec<Candidate>>,
    /// Last accepted report for the current pair
    pub weather: Option<WeatherReport>,
    /// Background asset derived from `weather`
    pub asset: Option<Asset>,
    pub loaded: bool,
    pub fatal_error: Option<Failure>,

    /// Weather query whose response is still wanted
    pub pending_weather: Option<WeatherQuery>,
    /// Search prefix whose response is still wanted
    pub pending_search: Option<String>,
    /// Geolocation lookup in flight
    pub geolocating: bool,
    /// The user has typed or picked since startup
    pub touched: bool,
}

impl Selection {
    /// Create the bootstrap selection
    pub fn new(placeholder_city: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            city: placeholder_city.into(),
            country_code: String::new(),
            coordinates,
            input_text: String::new(),
            candidates: None,
            weather: None,
            asset: None,
            loaded: false,
            fatal_error: None,
            pending_weather: None,
            pending_search: None,
            geolocating: false,
            touched: false,
        }
    }

    /// The `(city, countryCode)` pair as borrowed strings
    pub fn pair(&self) -> (&str, &str) {
        (&self.city, &self.country_code)
    }

    /// No city and no country chosen
    pub fn is_cleared(&self) -> bool {
        self.city.is_empty() && self.country_code.is_empty()
    }

    /// Both halves of the pair are known
    pub fn has_resolved_pair(&self) -> bool {
        !self.city.is_empty() && !self.country_code.is_empty()
    }

    /// Results panel is visible
    pub fn show_results(&self) -> bool {
        self.loaded && self.weather.is_some()
    }

    /// Dropdown is visible
    pub fn show_candidates(&self) -> bool {
        self.candidates.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn phase(&self) -> Phase {
        if self.fatal_error.is_some() {
            Phase::Failed
        } else if self.loaded && self.weather.is_some() {
            Phase::Loaded
        } else if self.is_cleared() {
            Phase::Searching
        } else if self.geolocating {
            Phase::Geolocating
        } else if self.pending_weather.is_none() && !self.touched && self.weather.is_none() {
            Phase::Bootstrap
        } else {
            Phase::Resolved
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(PLACEHOLDER_CITY, Coordinates::default())
    }
}
