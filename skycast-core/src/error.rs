//! Transport failures that halt the reconciler

use thiserror::Error;

use crate::selection::WeatherQuery;

/// A fatal, terminal failure.
///
/// Once stored in `Selection::fatal_error` no further weather queries are
/// issued; the only recovery is restarting the app. "Not found" answers and
/// empty search results are not failures and never end up here.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Failure {
    /// The one-shot geolocation lookup failed or was refused
    #[error("Geolocation failed: {0}")]
    Geolocation(String),

    /// Network/HTTP-layer error while talking to the Weather Service
    #[error("Weather request ({query}) failed: {message}")]
    WeatherTransport { query: WeatherQuery, message: String },
}

impl Failure {
    /// Message for the blocking error view.
    pub fn user_message(&self) -> &'static str {
        match self {
            Failure::Geolocation(_) => {
                "Could not determine your location. Restart skycast to try again."
            }
            Failure::WeatherTransport { .. } => {
                "Unable to reach the weather service. Restart skycast to try again."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_query() {
        let failure = Failure::WeatherTransport {
            query: WeatherQuery::by_name("Lima", "PE"),
            message: "connection refused".into(),
        };
        assert_eq!(
            failure.to_string(),
            "Weather request (q=Lima,PE) failed: connection refused"
        );
    }

    #[test]
    fn test_user_messages_are_non_empty() {
        let failures = [
            Failure::Geolocation("denied".into()),
            Failure::WeatherTransport {
                query: WeatherQuery::by_name("Lima", "PE"),
                message: "timeout".into(),
            },
        ];
        for failure in failures {
            assert!(!failure.user_message().is_empty());
        }
    }
}
