//! Test utilities for driving the reconciler
//!
//! - [`ReconcilerHarness`]: a store that records every effect it emits
//! - Fixture builders for reports, outcomes and candidates
//! - Assertion macros for verifying emitted effects
//!
//! # Example
//!
//! ```
//! use skycast_core::testing::ReconcilerHarness;
//! use skycast_core::{assert_effect, Action, Effect};
//!
//! let mut harness = ReconcilerHarness::default();
//! harness.dispatch(Action::InputChanged("Lon".into()));
//!
//! let effects = harness.drain_effects();
//! assert_effect!(effects, Effect::SearchCities { prefix } if prefix == "Lon");
//! ```

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::selection::{
    Candidate, Coordinates, Selection, WeatherOutcome, WeatherQuery, WeatherReport,
};
use crate::store::SelectionStore;

/// Store wrapper that keeps every emitted effect for later inspection.
pub struct ReconcilerHarness {
    store: SelectionStore,
    effects: Vec<Effect>,
}

impl ReconcilerHarness {
    pub fn new(state: Selection) -> Self {
        Self {
            store: SelectionStore::new(state),
            effects: Vec::new(),
        }
    }

    /// Dispatch an action, recording its effects.
    pub fn dispatch(&mut self, action: Action) -> DispatchResult<Effect> {
        let result = self.store.dispatch(action);
        self.effects.extend(result.effects.iter().cloned());
        result
    }

    /// Dispatch several actions in order.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    pub fn state(&self) -> &Selection {
        self.store.state()
    }

    /// Take all effects recorded so far.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Weather queries among the recorded effects, without draining them.
    pub fn weather_queries(&self) -> Vec<&WeatherQuery> {
        self.effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::FetchWeather(query) => Some(query),
                _ => None,
            })
            .collect()
    }
}

impl Default for ReconcilerHarness {
    fn default() -> Self {
        Self::new(Selection::default())
    }
}

/// A successful report with plausible defaults.
pub fn report(name: &str, country: &str, condition: &str, icon: &str) -> WeatherReport {
    WeatherReport {
        name: name.into(),
        country: country.into(),
        coordinates: Coordinates::new(0.0, 0.0),
        condition: condition.into(),
        description: condition.to_lowercase(),
        icon: icon.into(),
        temperature: 20.0,
        feels_like: 19.0,
        humidity: 50,
        wind_speed: 2.5,
    }
}

/// `WeatherResolved` carrying a successful report.
pub fn found(query: WeatherQuery, report: WeatherReport) -> Action {
    Action::WeatherResolved {
        query,
        outcome: WeatherOutcome::Found(report),
    }
}

/// `WeatherResolved` carrying a `cod: 404` answer.
pub fn not_found(query: WeatherQuery) -> Action {
    Action::WeatherResolved {
        query,
        outcome: WeatherOutcome::NotFound {
            code: 404,
            message: "city not found".into(),
        },
    }
}

/// A candidate at the given coordinates.
pub fn candidate(city: &str, country_code: &str, lat: f64, lon: f64) -> Candidate {
    Candidate::new(city, country_code, Coordinates::new(lat, lon))
}

/// Assert that an effect matching the pattern was emitted.
#[macro_export]
macro_rules! assert_effect {
    ($effects:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $effects.iter().any(|e| matches!(e, $pattern $(if $guard)?)),
            "Expected effect matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $effects
        );
    };
}

/// Assert that no effect matching the pattern was emitted.
#[macro_export]
macro_rules! assert_no_effect {
    ($effects:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$effects.iter().any(|e| matches!(e, $pattern $(if $guard)?)),
            "Expected effect matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $effects
        );
    };
}

/// Count effects matching a pattern.
#[macro_export]
macro_rules! count_effects {
    ($effects:expr, $pattern:pat $(if $guard:expr)?) => {
        $effects.iter().filter(|e| matches!(e, $pattern $(if $guard)?)).count()
    };
}
