//! Data transfer objects for web requests and responses.

use serde::Serialize;

use crate::domain::Stop;

/// A stop in the station list.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Stop identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Transport modes served
    pub modes: Vec<String>,
}

impl StationResult {
    /// Create from a domain Stop.
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            id: stop.id.as_str().to_string(),
            name: stop.name.clone(),
            modes: stop.modes.clone(),
        }
    }
}

/// Response for the station list.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// Stops in display order
    pub stations: Vec<StationResult>,
}

/// Response to a selection change.
///
/// The page applies `location` with `history.replaceState` and sets
/// `document.title` to `title`.
#[derive(Debug, Serialize)]
pub struct SelectResponse {
    /// Page title for the new selection
    pub title: String,

    /// Page location encoding the new selection
    pub location: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;

    #[test]
    fn station_result_from_stop() {
        let stop = Stop::new(
            StopId::parse("940GZZLUBNK").unwrap(),
            "Bank Underground Station",
            vec!["tube".into(), "dlr".into()],
        );

        let result = StationResult::from_stop(&stop);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["id"], "940GZZLUBNK");
        assert_eq!(json["name"], "Bank Underground Station");
        assert_eq!(json["modes"][1], "dlr");
    }
}
