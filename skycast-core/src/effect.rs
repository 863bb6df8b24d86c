//! Effects - side effects declared by the reducer
//!
//! The reducer never performs I/O. It returns [`Effect`]s alongside the
//! state change and the runtime turns them into service calls whose
//! results come back as actions.

use crate::selection::WeatherQuery;

/// Service calls the reducer can request
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// One-shot position lookup
    Geolocate,
    /// Current conditions for a city/country pair or a coordinate pair
    FetchWeather(WeatherQuery),
    /// Ranked city suggestions for a typed prefix
    SearchCities { prefix: String },
}

impl Effect {
    /// Request kind, used as the task key
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::Geolocate => "geolocation",
            Effect::FetchWeather(_) => "weather",
            Effect::SearchCities { .. } => "city_search",
        }
    }
}

/// Result of dispatching an action.
///
/// Contains both the state change indicator and any effects to be processed.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, nothing to run.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed and one effect to run.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add an effect when one is given.
    #[inline]
    pub fn with_opt(mut self, effect: Option<E>) -> Self {
        self.effects.extend(effect);
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_result_builders() {
        let r: DispatchResult<Effect> = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r = DispatchResult::changed_with(Effect::Geolocate);
        assert!(r.changed);
        assert_eq!(r.effects, vec![Effect::Geolocate]);
    }

    #[test]
    fn test_dispatch_result_chaining() {
        let r = DispatchResult::changed()
            .with(Effect::Geolocate)
            .with_opt(None)
            .with_opt(Some(Effect::SearchCities { prefix: "Ber".into() }));
        assert!(r.changed);
        assert_eq!(r.effects.len(), 2);
    }

    #[test]
    fn test_effect_kinds() {
        assert_eq!(Effect::Geolocate.kind(), "geolocation");
        assert_eq!(
            Effect::FetchWeather(WeatherQuery::by_name("Rome", "IT")).kind(),
            "weather"
        );
        assert_eq!(Effect::SearchCities { prefix: "R".into() }.kind(), "city_search");
    }
}
