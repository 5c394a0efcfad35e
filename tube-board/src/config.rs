//! Board configuration.

use std::time::Duration;

/// Configuration for the station directory and the departure poller.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Transport modes whose stops populate the directory.
    pub modes: Vec<String>,

    /// Stop-structure kinds accepted into the directory.
    pub stop_types: Vec<String>,

    /// Only stops whose id starts with this prefix are accepted.
    /// `None` accepts every id.
    pub id_prefix: Option<String>,

    /// How often the selected stop is re-polled (milliseconds).
    pub poll_interval_ms: u64,

    /// Maximum departures shown per platform.
    pub max_rows_per_platform: usize,

    /// Timeout for each upstream API request (seconds).
    pub request_timeout_secs: u64,
}

impl BoardConfig {
    /// Returns the poll interval as a Duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Set the transport modes.
    pub fn with_modes(mut self, modes: &[&str]) -> Self {
        self.modes = modes.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Set the accepted stop types.
    pub fn with_stop_types(mut self, types: &[&str]) -> Self {
        self.stop_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Set or clear the id prefix filter.
    pub fn with_id_prefix(mut self, prefix: Option<&str>) -> Self {
        self.id_prefix = prefix.map(String::from);
        self
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            modes: vec!["tube".to_string()],
            stop_types: vec!["NaptanMetroStation".to_string()],
            // London Underground station prefix
            id_prefix: Some("940GZZLU".to_string()),
            poll_interval_ms: 30_000,
            max_rows_per_platform: 10,
            request_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BoardConfig::default();

        assert_eq!(config.modes, vec!["tube"]);
        assert_eq!(config.stop_types, vec!["NaptanMetroStation"]);
        assert_eq!(config.id_prefix.as_deref(), Some("940GZZLU"));
        assert_eq!(config.poll_interval_ms, 30_000);
        assert_eq!(config.max_rows_per_platform, 10);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn duration_methods() {
        let config = BoardConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn custom_config() {
        let config = BoardConfig::default()
            .with_modes(&["tube", "dlr"])
            .with_stop_types(&["NaptanMetroStation", "NaptanRailStation"])
            .with_id_prefix(None);

        assert_eq!(config.modes, vec!["tube", "dlr"]);
        assert_eq!(config.stop_types.len(), 2);
        assert_eq!(config.id_prefix, None);
    }
}
