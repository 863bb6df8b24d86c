//! Turns reducer effects into service calls
//!
//! Each effect becomes one task keyed by its kind. The task calls the
//! matching client and maps the result to the action the reducer expects,
//! always tagged with the query or prefix it answers.

use skycast_core::{Action, Effect, Failure, WeatherQuery};

use crate::api::{CitySearchClient, Geolocator, OpenWeatherClient};
use crate::tasks::TaskManager;

/// Owns the service clients
#[derive(Debug, Clone)]
pub struct EffectHandler {
    weather: OpenWeatherClient,
    search: CitySearchClient,
    geolocator: Geolocator,
}

impl EffectHandler {
    pub fn new(
        weather: OpenWeatherClient,
        search: CitySearchClient,
        geolocator: Geolocator,
    ) -> Self {
        Self {
            weather,
            search,
            geolocator,
        }
    }

    /// Spawn the task for an effect, replacing any older one of the same kind.
    pub fn handle(&self, effect: Effect, tasks: &mut TaskManager<Action>) {
        let key = effect.kind();
        let handler = self.clone();
        tasks.spawn(key, async move { handler.run(effect).await });
    }

    /// Perform an effect and produce the resulting action.
    pub async fn run(&self, effect: Effect) -> Action {
        match effect {
            Effect::Geolocate => self.geolocate().await,
            Effect::FetchWeather(query) => self.fetch_weather(query).await,
            Effect::SearchCities { prefix } => self.search_cities(prefix).await,
        }
    }

    async fn geolocate(&self) -> Action {
        match self.geolocator.locate().await {
            Ok(coordinates) => {
                tracing::info!(%coordinates, "Position resolved");
                Action::GeolocationResolved(coordinates)
            }
            Err(e) => Action::Failed(Failure::Geolocation(e.to_string())),
        }
    }

    async fn fetch_weather(&self, query: WeatherQuery) -> Action {
        match self.weather.fetch_query(&query).await {
            Ok(outcome) => Action::WeatherResolved { query, outcome },
            Err(e) => Action::Failed(Failure::WeatherTransport {
                query,
                message: e.to_string(),
            }),
        }
    }

    async fn search_cities(&self, prefix: String) -> Action {
        let candidates = match self.search.search(&prefix).await {
            Ok(candidates) => candidates,
            Err(e) => {
                // Search trouble only empties the dropdown
                tracing::warn!(prefix = %prefix, error = %e, "City search failed");
                Vec::new()
            }
        };
        Action::SearchResolved { prefix, candidates }
    }
}
