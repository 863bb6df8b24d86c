//! Selection reconciler for skycast
//!
//! Three independently timed sources write into the same on-screen
//! selection: a one-shot geolocation lookup, a city search fired on every
//! keystroke, and weather lookups fired whenever the chosen city changes.
//! This crate reconciles them with a Redux/Elm-style loop:
//!
//! - **Selection**: the single record the UI renders from
//! - **Action**: tagged events (user intents and service results)
//! - **Effect**: service calls the reducer asks the runtime to make
//! - **reduce**: the pure `(selection, action) -> effects` transition function
//!
//! Responses carry the query or prefix they answer; the reducer drops any
//! response that no longer matches what is pending.
//!
//! # Example
//!
//! ```
//! use skycast_core::{reduce, Action, Candidate, Coordinates, Effect, Selection, WeatherQuery};
//!
//! let mut selection = Selection::default();
//! reduce(&mut selection, Action::InputChanged("Lon".into()));
//!
//! let london = Candidate::new("London", "GB", Coordinates::new(51.5, -0.13));
//! let result = reduce(&mut selection, Action::CandidateSelected(london));
//!
//! assert_eq!(selection.input_text, "London, GB");
//! assert_eq!(
//!     result.effects,
//!     vec![Effect::FetchWeather(WeatherQuery::by_name("London", "GB"))]
//! );
//! ```

pub mod action;
pub mod assets;
pub mod effect;
pub mod error;
pub mod reducer;
pub mod selection;
pub mod store;
pub mod testing;

pub use action::Action;
pub use assets::{
    resolve_asset, Asset, AssetCatalog, AssetPair, ConditionKey, TimeOfDay, NEUTRAL_PAIR,
};
pub use effect::{DispatchResult, Effect};
pub use error::Failure;
pub use reducer::reduce;
pub use selection::{
    Candidate, Coordinates, Phase, Selection, WeatherOutcome, WeatherQuery, WeatherReport,
    PLACEHOLDER_CITY,
};
pub use store::{
    LoggingMiddleware, Middleware, NoopMiddleware, SelectionReducer, SelectionStore,
    SelectionStoreWithMiddleware,
};
