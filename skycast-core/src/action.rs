//! Events fed into the reconciler
//!
//! Naming follows the async pattern: intents come from the user
//! (`InputChanged`, `CandidateSelected`), results come back from the
//! services (`*Resolved`, `Failed`). Results carry the tag of the request
//! that produced them so the reducer can drop stale ones.

use crate::error::Failure;
use crate::selection::{Candidate, Coordinates, WeatherOutcome, WeatherQuery};

/// Every event the Selection reconciler understands
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// App mounted: start geolocation and load the placeholder city
    Bootstrap,

    /// Result: the geolocation provider answered
    GeolocationResolved(Coordinates),

    /// Intent: the search field text changed
    InputChanged(String),

    /// Intent: the user picked a dropdown entry
    CandidateSelected(Candidate),

    /// Result: the weather service answered `query`
    WeatherResolved {
        query: WeatherQuery,
        outcome: WeatherOutcome,
    },

    /// Result: the city search answered `prefix`
    SearchResolved {
        prefix: String,
        candidates: Vec<Candidate>,
    },

    /// Result: a transport-level failure
    Failed(Failure),

    /// Exit the application (handled by the runtime, not the reducer)
    Quit,
}

impl Action {
    /// Static name for logging and filtering
    pub fn name(&self) -> &'static str {
        match self {
            Action::Bootstrap => "Bootstrap",
            Action::GeolocationResolved(_) => "GeolocationResolved",
            Action::InputChanged(_) => "InputChanged",
            Action::CandidateSelected(_) => "CandidateSelected",
            Action::WeatherResolved { .. } => "WeatherResolved",
            Action::SearchResolved { .. } => "SearchResolved",
            Action::Failed(_) => "Failed",
            Action::Quit => "Quit",
        }
    }

    /// Concise one-line description for the action log
    pub fn summary(&self) -> String {
        match self {
            Action::WeatherResolved { query, outcome } => match outcome {
                WeatherOutcome::Found(report) => format!(
                    "WeatherResolved {{ {query}, {} {}, {} }}",
                    report.name, report.country, report.condition
                ),
                WeatherOutcome::NotFound { code, .. } => {
                    format!("WeatherResolved {{ {query}, cod: {code} }}")
                }
            },
            Action::SearchResolved { prefix, candidates } => {
                format!("SearchResolved {{ {prefix:?}, {} candidates }}", candidates.len())
            }
            Action::CandidateSelected(candidate) => {
                format!("CandidateSelected({:?})", candidate.label())
            }
            Action::Failed(failure) => {
                let msg = failure.to_string();
                let msg = if msg.len() > 60 {
                    format!("{}...", msg.chars().take(57).collect::<String>())
                } else {
                    msg
                };
                format!("Failed({msg:?})")
            }
            _ => format!("{self:?}"),
        }
    }
}
