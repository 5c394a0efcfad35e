//! TfL Unified API response DTOs.
//!
//! These map directly to the JSON the API returns. Fields we never read are
//! left out; serde ignores them. Nearly everything is `Option` because the
//! API omits or nulls fields freely.

use serde::{Deserialize, Serialize};

/// Response from `StopPoint/Mode/{modes}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPointsResponse {
    pub stop_points: Vec<StopPoint>,

    /// Present on paged responses.
    pub total: Option<u32>,
}

/// A stop record.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPoint {
    /// Stop identifier, e.g. "940GZZLUOXC".
    pub id: String,

    /// NaPTAN identifier. Usually equal to `id`.
    pub naptan_id: Option<String>,

    /// Display name, e.g. "Oxford Circus Underground Station".
    pub common_name: Option<String>,

    /// Modes served, e.g. `["bus", "tube"]`.
    #[serde(default)]
    pub modes: Vec<String>,

    /// Stop-structure kind, e.g. "NaptanMetroStation".
    pub stop_type: Option<String>,
}

/// One arrival prediction from `StopPoint/{id}/Arrivals`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalPrediction {
    /// Prediction identifier.
    pub id: Option<String>,

    /// Line name, e.g. "Central".
    pub line_name: Option<String>,

    /// Line identifier, e.g. "central".
    pub line_id: Option<String>,

    /// Destination name, e.g. "Epping Underground Station".
    pub destination_name: Option<String>,

    /// Seconds until arrival. Occasionally slightly negative for
    /// trains already at the platform.
    pub time_to_station: Option<i64>,

    /// Platform name, e.g. "Eastbound - Platform 1".
    pub platform_name: Option<String>,

    /// Free-text direction hint, e.g. "Hainault via Newbury Park".
    pub towards: Option<String>,
}
