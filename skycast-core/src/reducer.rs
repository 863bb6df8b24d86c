//! Reducer - (selection, action) -> (selection', effects)
//!
//! All Selection mutations happen here. The reducer performs no I/O: it
//! returns effects for the runtime to execute, and every response comes
//! back tagged with the request it answers. A response whose tag no longer
//! matches the pending request is dropped, so a slow, superseded request
//! can never overwrite a newer one.

use tracing::{debug, warn};

use crate::action::Action;
use crate::assets::resolve_asset;
use crate::effect::{DispatchResult, Effect};
use crate::error::Failure;
use crate::selection::{Candidate, Coordinates, Selection, WeatherOutcome, WeatherQuery};

/// Apply one event to the selection.
pub fn reduce(state: &mut Selection, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Bootstrap => bootstrap(state),
        Action::GeolocationResolved(coordinates) => geolocation_resolved(state, coordinates),
        Action::InputChanged(text) => input_changed(state, text),
        Action::CandidateSelected(candidate) => candidate_selected(state, candidate),
        Action::WeatherResolved { query, outcome } => weather_resolved(state, query, outcome),
        Action::SearchResolved { prefix, candidates } => {
            search_resolved(state, prefix, candidates)
        }
        Action::Failed(failure) => failed(state, failure),
        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn bootstrap(state: &mut Selection) -> DispatchResult<Effect> {
    if state.geolocating {
        return DispatchResult::unchanged();
    }
    state.geolocating = true;
    DispatchResult::changed_with(Effect::Geolocate).with_opt(request_weather(state))
}

fn geolocation_resolved(state: &mut Selection, coordinates: Coordinates) -> DispatchResult<Effect> {
    if !state.geolocating {
        debug!("Ignoring unsolicited geolocation result");
        return DispatchResult::unchanged();
    }
    state.geolocating = false;

    if state.touched {
        debug!(%coordinates, "User already chose a city, ignoring geolocation");
        return DispatchResult::changed();
    }
    if state.fatal_error.is_some() {
        return DispatchResult::changed();
    }

    state.coordinates = coordinates;
    let query = WeatherQuery::ByCoordinates(coordinates);
    state.pending_weather = Some(query.clone());
    DispatchResult::changed_with(Effect::FetchWeather(query))
}

fn input_changed(state: &mut Selection, text: String) -> DispatchResult<Effect> {
    if text == state.input_text {
        return DispatchResult::unchanged();
    }
    state.touched = true;
    state.input_text = text;

    // Editing always invalidates a prior selection, in this same step
    if !state.is_cleared() {
        state.city.clear();
        state.country_code.clear();
        state.pending_weather = None;
        state.weather = None;
        state.loaded = false;
    }

    if state.input_text.trim().is_empty() {
        state.candidates = None;
        state.pending_search = None;
        return DispatchResult::changed();
    }

    let prefix = state.input_text.clone();
    state.pending_search = Some(prefix.clone());
    DispatchResult::changed_with(Effect::SearchCities { prefix })
}

fn candidate_selected(state: &mut Selection, candidate: Candidate) -> DispatchResult<Effect> {
    state.touched = true;
    state.input_text = candidate.label();
    state.candidates = None;
    state.pending_search = None;

    if state.pair() == (candidate.city.as_str(), candidate.country_code.as_str()) {
        return DispatchResult::changed();
    }

    state.city = candidate.city;
    state.country_code = candidate.country_code;
    state.weather = None;
    state.loaded = false;
    DispatchResult::changed().with_opt(request_weather(state))
}

fn weather_resolved(
    state: &mut Selection,
    query: WeatherQuery,
    outcome: WeatherOutcome,
) -> DispatchResult<Effect> {
    if state.fatal_error.is_some() {
        return DispatchResult::unchanged();
    }
    if state.pending_weather.as_ref() != Some(&query) {
        debug!(%query, "Discarding stale weather response");
        return DispatchResult::unchanged();
    }
    state.pending_weather = None;

    match outcome {
        WeatherOutcome::NotFound { code, message } => {
            warn!(%query, code, %message, "Weather service could not resolve location");
            // Keep the loading indicator up; never flash "loaded" with no data
            state.loaded = false;
        }
        WeatherOutcome::Found(report) => {
            if matches!(query, WeatherQuery::ByCoordinates(_)) && !report.name.is_empty() {
                // Reverse-geocoded name; the country stays unresolved
                state.city = report.name.clone();
            }
            state.coordinates = report.coordinates;
            state.asset = Some(resolve_asset(&report.condition, &report.icon));
            state.weather = Some(report);
            state.candidates = None;
            state.loaded = true;
        }
    }
    DispatchResult::changed()
}

fn search_resolved(
    state: &mut Selection,
    prefix: String,
    candidates: Vec<Candidate>,
) -> DispatchResult<Effect> {
    if !state.is_cleared() || state.pending_search.as_deref() != Some(prefix.as_str()) {
        debug!(prefix = %prefix, "Discarding stale search response");
        return DispatchResult::unchanged();
    }
    state.pending_search = None;
    state.candidates = Some(candidates);
    DispatchResult::changed()
}

fn failed(state: &mut Selection, failure: Failure) -> DispatchResult<Effect> {
    match &failure {
        Failure::Geolocation(_) => {
            state.geolocating = false;
        }
        Failure::WeatherTransport { query, .. } => {
            if state.pending_weather.as_ref() != Some(query) {
                debug!(%query, "Discarding failure of a superseded weather request");
                return DispatchResult::unchanged();
            }
            state.pending_weather = None;
        }
    }

    tracing::error!(error = %failure, "Fatal failure, halting weather updates");
    if state.fatal_error.is_none() {
        state.fatal_error = Some(failure);
    }
    DispatchResult::changed()
}

/// Issue a weather query for the current pair, unless there is nothing to ask for.
fn request_weather(state: &mut Selection) -> Option<Effect> {
    if state.fatal_error.is_some() || state.is_cleared() {
        state.pending_weather = None;
        return None;
    }
    if !state.has_resolved_pair() {
        debug!(city = %state.city, "Querying weather without a country code");
    }
    let query = WeatherQuery::by_name(&state.city, &state.country_code);
    state.pending_weather = Some(query.clone());
    Some(Effect::FetchWeather(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TimeOfDay;
    use crate::selection::{Phase, WeatherReport, PLACEHOLDER_CITY};

    fn report(name: &str, country: &str, condition: &str, icon: &str) -> WeatherReport {
        WeatherReport {
            name: name.into(),
            country: country.into(),
            coordinates: Coordinates::new(1.0, 2.0),
            condition: condition.into(),
            description: condition.to_lowercase(),
            icon: icon.into(),
            temperature: 18.0,
            feels_like: 17.5,
            humidity: 60,
            wind_speed: 3.0,
        }
    }

    fn london() -> Candidate {
        Candidate::new("London", "GB", Coordinates::new(51.5, -0.13))
    }

    #[test]
    fn test_bootstrap_geolocates_and_loads_placeholder() {
        let mut state = Selection::default();
        let result = reduce(&mut state, Action::Bootstrap);

        assert!(result.changed);
        assert_eq!(
            result.effects,
            vec![
                Effect::Geolocate,
                Effect::FetchWeather(WeatherQuery::by_name(PLACEHOLDER_CITY, "")),
            ]
        );
        assert!(state.geolocating);
        assert_eq!(state.phase(), Phase::Geolocating);
    }

    #[test]
    fn test_bootstrap_is_idempotent_while_geolocating() {
        let mut state = Selection::default();
        reduce(&mut state, Action::Bootstrap);
        let result = reduce(&mut state, Action::Bootstrap);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_geolocation_queries_by_coordinates() {
        let mut state = Selection::default();
        reduce(&mut state, Action::Bootstrap);

        let here = Coordinates::new(48.85, 2.35);
        let result = reduce(&mut state, Action::GeolocationResolved(here));

        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather(WeatherQuery::ByCoordinates(here))]
        );
        assert_eq!(state.coordinates, here);
        assert!(!state.geolocating);
    }

    #[test]
    fn test_geolocation_after_user_pick_is_ignored() {
        let mut state = Selection::default();
        reduce(&mut state, Action::Bootstrap);
        reduce(&mut state, Action::InputChanged("Lon".into()));
        reduce(&mut state, Action::CandidateSelected(london()));

        let result = reduce(
            &mut state,
            Action::GeolocationResolved(Coordinates::new(40.7, -74.0)),
        );
        assert!(result.effects.is_empty());
        assert_eq!(state.pair(), ("London", "GB"));
        assert_eq!(
            state.pending_weather,
            Some(WeatherQuery::by_name("London", "GB"))
        );
    }

    #[test]
    fn test_edit_clears_selected_city_in_same_step() {
        let mut state = Selection::default();
        reduce(&mut state, Action::CandidateSelected(london()));
        reduce(
            &mut state,
            Action::WeatherResolved {
                query: WeatherQuery::by_name("London", "GB"),
                outcome: WeatherOutcome::Found(report("London", "GB", "Rain", "10d")),
            },
        );
        assert!(state.show_results());

        let result = reduce(&mut state, Action::InputChanged("London, G".into()));

        assert!(state.is_cleared());
        assert!(state.weather.is_none());
        assert!(!state.loaded);
        assert!(state.pending_weather.is_none());
        assert_eq!(
            result.effects,
            vec![Effect::SearchCities {
                prefix: "London, G".into()
            }]
        );
    }

    #[test]
    fn test_clearing_input_hides_dropdown_without_searching() {
        let mut state = Selection::default();
        reduce(&mut state, Action::InputChanged("Pa".into()));
        reduce(
            &mut state,
            Action::SearchResolved {
                prefix: "Pa".into(),
                candidates: vec![Candidate::new("Paris", "FR", Coordinates::new(48.85, 2.35))],
            },
        );
        assert!(state.show_candidates());

        let result = reduce(&mut state, Action::InputChanged("  ".into()));
        assert!(result.effects.is_empty());
        assert!(state.candidates.is_none());
        assert!(state.pending_search.is_none());
    }

    #[test]
    fn test_unchanged_text_is_a_noop() {
        let mut state = Selection::default();
        let result = reduce(&mut state, Action::InputChanged(String::new()));
        assert!(!result.changed);
        assert!(!state.touched);
    }

    #[test]
    fn test_select_candidate_normalizes_input() {
        let mut state = Selection::default();
        reduce(&mut state, Action::InputChanged("pArIs!!".into()));
        let paris = Candidate::new("Paris", "FR", Coordinates::new(48.85, 2.35));

        let result = reduce(&mut state, Action::CandidateSelected(paris));

        assert_eq!(state.input_text, "Paris, FR");
        assert!(state.candidates.is_none());
        assert!(state.weather.is_none());
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather(WeatherQuery::by_name("Paris", "FR"))]
        );
    }

    #[test]
    fn test_reselecting_same_pair_does_not_refetch() {
        let mut state = Selection::default();
        reduce(&mut state, Action::CandidateSelected(london()));
        let result = reduce(&mut state, Action::CandidateSelected(london()));
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_not_found_keeps_loading() {
        let mut state = Selection::default();
        reduce(&mut state, Action::CandidateSelected(london()));
        reduce(
            &mut state,
            Action::WeatherResolved {
                query: WeatherQuery::by_name("London", "GB"),
                outcome: WeatherOutcome::NotFound {
                    code: 404,
                    message: "city not found".into(),
                },
            },
        );
        assert!(!state.loaded);
        assert!(state.weather.is_none());
        assert!(state.asset.is_none());
        assert!(!state.show_results());
    }

    #[test]
    fn test_found_sets_asset_and_coordinates() {
        let mut state = Selection::default();
        reduce(&mut state, Action::CandidateSelected(london()));
        reduce(
            &mut state,
            Action::WeatherResolved {
                query: WeatherQuery::by_name("London", "GB"),
                outcome: WeatherOutcome::Found(report("London", "GB", "Clouds", "04n")),
            },
        );
        let asset = state.asset.as_ref().expect("asset");
        assert_eq!(asset.file, "nightCloud.mp4");
        assert_eq!(asset.time_of_day, TimeOfDay::Night);
        assert_eq!(state.coordinates, Coordinates::new(1.0, 2.0));
        assert_eq!(state.phase(), Phase::Loaded);
    }

    #[test]
    fn test_stale_weather_response_is_dropped() {
        let mut state = Selection::default();
        reduce(&mut state, Action::Bootstrap);
        reduce(&mut state, Action::CandidateSelected(london()));

        // Placeholder query answered late
        let result = reduce(
            &mut state,
            Action::WeatherResolved {
                query: WeatherQuery::by_name(PLACEHOLDER_CITY, ""),
                outcome: WeatherOutcome::Found(report("New York", "US", "Clear", "01d")),
            },
        );
        assert!(!result.changed);
        assert!(state.weather.is_none());
        assert!(!state.loaded);
    }

    #[test]
    fn test_stale_search_response_is_dropped() {
        let mut state = Selection::default();
        reduce(&mut state, Action::InputChanged("B".into()));
        reduce(&mut state, Action::InputChanged("Be".into()));

        let result = reduce(
            &mut state,
            Action::SearchResolved {
                prefix: "B".into(),
                candidates: vec![Candidate::new("Boston", "US", Coordinates::new(42.36, -71.06))],
            },
        );
        assert!(!result.changed);
        assert!(state.candidates.is_none());
    }

    #[test]
    fn test_search_response_after_pick_is_dropped() {
        let mut state = Selection::default();
        reduce(&mut state, Action::InputChanged("Lon".into()));
        reduce(&mut state, Action::CandidateSelected(london()));
        let result = reduce(
            &mut state,
            Action::SearchResolved {
                prefix: "Lon".into(),
                candidates: vec![london()],
            },
        );
        assert!(!result.changed);
        assert!(state.candidates.is_none());
    }

    #[test]
    fn test_geolocation_failure_is_fatal() {
        let mut state = Selection::default();
        reduce(&mut state, Action::Bootstrap);
        reduce(
            &mut state,
            Action::Failed(Failure::Geolocation("permission denied".into())),
        );
        assert_eq!(state.phase(), Phase::Failed);

        // Text input keeps working, weather queries stop
        let result = reduce(&mut state, Action::InputChanged("Ro".into()));
        assert_eq!(result.effects, vec![Effect::SearchCities { prefix: "Ro".into() }]);
        let result = reduce(
            &mut state,
            Action::CandidateSelected(Candidate::new("Rome", "IT", Coordinates::new(41.9, 12.5))),
        );
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_transport_failure_of_pending_query_is_fatal() {
        let mut state = Selection::default();
        reduce(&mut state, Action::CandidateSelected(london()));
        reduce(
            &mut state,
            Action::Failed(Failure::WeatherTransport {
                query: WeatherQuery::by_name("London", "GB"),
                message: "connection reset".into(),
            }),
        );
        assert!(state.fatal_error.is_some());

        // Late answers are ignored once halted
        let result = reduce(
            &mut state,
            Action::WeatherResolved {
                query: WeatherQuery::by_name("London", "GB"),
                outcome: WeatherOutcome::Found(report("London", "GB", "Rain", "10d")),
            },
        );
        assert!(!result.changed);
    }

    #[test]
    fn test_transport_failure_of_superseded_query_is_ignored() {
        let mut state = Selection::default();
        reduce(&mut state, Action::Bootstrap);
        reduce(&mut state, Action::CandidateSelected(london()));
        let result = reduce(
            &mut state,
            Action::Failed(Failure::WeatherTransport {
                query: WeatherQuery::by_name(PLACEHOLDER_CITY, ""),
                message: "timeout".into(),
            }),
        );
        assert!(!result.changed);
        assert!(state.fatal_error.is_none());
    }

    #[test]
    fn test_quit_is_ignored() {
        let mut state = Selection::default();
        let before = state.clone();
        let result = reduce(&mut state, Action::Quit);
        assert!(!result.changed);
        assert_eq!(state, before);
    }
}
