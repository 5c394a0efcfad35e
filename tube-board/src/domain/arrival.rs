//! Predicted arrivals at a stop.

/// Label used for arrivals whose platform the API did not report.
pub const UNKNOWN_PLATFORM: &str = "Unknown Platform";

/// One predicted vehicle arrival at a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    /// Line name, e.g. "Central".
    pub line_name: String,
    /// Destination name. Arrivals without one are not displayed.
    pub destination_name: Option<String>,
    /// Seconds until the vehicle reaches the stop.
    pub time_to_station: u32,
    /// Platform name as reported, e.g. "Westbound - Platform 1".
    pub platform_name: Option<String>,
}

impl Arrival {
    /// Whole minutes until arrival, truncated.
    pub fn minutes(&self) -> u32 {
        self.time_to_station / 60
    }

    /// Platform label used for grouping.
    pub fn platform_label(&self) -> &str {
        match self.platform_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_PLATFORM,
        }
    }
}
