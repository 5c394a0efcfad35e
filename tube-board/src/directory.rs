//! Station directory.
//!
//! The list of selectable stops, fetched once at startup and never
//! mutated afterwards.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{error, info};

use crate::config::BoardConfig;
use crate::domain::{Stop, StopId};
use crate::tfl::{StopPoint, TflError, TransitSource, convert_stop_points};

/// Errors loading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Fetching the stop list failed
    #[error("failed to fetch stop list: {0}")]
    Fetch(#[from] TflError),
}

/// Sorted, deduplicated list of selectable stops.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stops: Arc<Vec<Stop>>,
    index: Arc<HashMap<StopId, usize>>,
}

impl StationDirectory {
    /// Fetch and build the directory.
    ///
    /// There is no retry: a failure here is returned to the caller as is.
    pub async fn load(
        source: &dyn TransitSource,
        config: &BoardConfig,
    ) -> Result<Self, DirectoryError> {
        let points = source.stop_points(&config.modes).await?;
        let directory = Self::from_stop_points(&points, config);

        info!(
            fetched = points.len(),
            kept = directory.len(),
            "loaded station directory"
        );

        Ok(directory)
    }

    /// Fetch and build the directory, or fall back to an empty one.
    ///
    /// A failure is logged and not retried; the selector stays empty until
    /// restart.
    pub async fn load_or_empty(source: &dyn TransitSource, config: &BoardConfig) -> Self {
        match Self::load(source, config).await {
            Ok(directory) => directory,
            Err(e) => {
                error!(error = %e, "failed to load station directory");
                Self::empty()
            }
        }
    }

    /// Build the directory from raw stop records.
    pub fn from_stop_points(points: &[StopPoint], config: &BoardConfig) -> Self {
        let stops = convert_stop_points(points)
            .into_iter()
            .filter(|(stop, stop_type)| accepts(stop, stop_type.as_deref(), config))
            .map(|(stop, _)| stop)
            .collect();

        Self::from_stops(stops)
    }

    /// Build the directory from already-filtered stops.
    ///
    /// Deduplicates by display name (first occurrence wins) and by id, then
    /// sorts by display name.
    pub fn from_stops(stops: Vec<Stop>) -> Self {
        let mut seen_names = HashSet::new();
        let mut seen_ids = HashSet::new();

        let mut stops: Vec<Stop> = stops
            .into_iter()
            .filter(|s| {
                !seen_ids.contains(&s.id)
                    && seen_names.insert(s.name.clone())
                    && seen_ids.insert(s.id.clone())
            })
            .collect();

        // Stable, so equal names keep fetch order.
        stops.sort_by(|a, b| locale_cmp(&a.name, &b.name));

        let index = stops
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();

        Self {
            stops: Arc::new(stops),
            index: Arc::new(index),
        }
    }

    /// Create an empty directory.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a stop by id.
    pub fn get(&self, id: &StopId) -> Option<&Stop> {
        self.index.get(id).map(|&i| &self.stops[i])
    }

    /// All stops in display order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Whether a converted stop passes the configured filters.
fn accepts(stop: &Stop, stop_type: Option<&str>, config: &BoardConfig) -> bool {
    if stop.name.trim().is_empty() {
        return false;
    }

    let type_ok = stop_type.is_some_and(|t| config.stop_types.iter().any(|a| a == t));
    let prefix_ok = config
        .id_prefix
        .as_deref()
        .is_none_or(|p| stop.id.has_prefix(p));

    type_ok && prefix_ok
}

/// Compare display names the way a user expects a station list sorted.
///
/// Case and punctuation are ignored at first; only names that are equal
/// under that folding fall back to a plain comparison.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    fold(a).cmp(fold(b)).then_with(|| a.cmp(b))
}

fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
}
