//! Mock TfL client for running without API access.
//!
//! Loads recorded API responses from a directory and serves them as if
//! they were live:
//! - `stops.json` holds a `StopPoint/Mode` response
//! - `{stop id}.json` holds an `Arrivals` response for that stop

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::domain::{Arrival, StopId};

use super::TransitSource;
use super::convert::convert_arrivals;
use super::error::TflError;
use super::types::{ArrivalPrediction, StopPoint, StopPointsResponse};

/// Name of the stop list fixture.
const STOPS_FILE: &str = "stops.json";

/// Mock TfL client that serves data from JSON files.
#[derive(Clone)]
pub struct MockTflClient {
    stop_points: Arc<Vec<StopPoint>>,
    /// Arrival predictions, keyed by stop id.
    arrivals: Arc<HashMap<StopId, Vec<ArrivalPrediction>>>,
}

impl MockTflClient {
    /// Create a new mock client by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, TflError> {
        let data_dir = data_dir.as_ref();

        let stops_path = data_dir.join(STOPS_FILE);
        let json = std::fs::read_to_string(&stops_path).map_err(|e| TflError::Mock {
            message: format!("failed to read {:?}: {}", stops_path, e),
        })?;
        let response: StopPointsResponse =
            serde_json::from_str(&json).map_err(|e| TflError::Mock {
                message: format!("failed to parse {:?}: {}", stops_path, e),
            })?;

        let entries = std::fs::read_dir(data_dir).map_err(|e| TflError::Mock {
            message: format!("failed to read mock data directory: {}", e),
        })?;

        let mut arrivals = HashMap::new();
        for entry in entries {
            let entry = entry.map_err(|e| TflError::Mock {
                message: format!("failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if path.file_name().and_then(|s| s.to_str()) == Some(STOPS_FILE) {
                continue;
            }

            let id = StopId::parse(stem).map_err(|_| TflError::Mock {
                message: format!("invalid stop id in filename: {}", stem),
            })?;

            let json = std::fs::read_to_string(&path).map_err(|e| TflError::Mock {
                message: format!("failed to read {:?}: {}", path, e),
            })?;
            let predictions: Vec<ArrivalPrediction> =
                serde_json::from_str(&json).map_err(|e| TflError::Mock {
                    message: format!("failed to parse {:?}: {}", path, e),
                })?;

            arrivals.insert(id, predictions);
        }

        Ok(Self {
            stop_points: Arc::new(response.stop_points),
            arrivals: Arc::new(arrivals),
        })
    }

    /// Stops that have arrival fixtures.
    pub fn available_stops(&self) -> Vec<StopId> {
        self.arrivals.keys().cloned().collect()
    }

    fn get_arrivals(&self, stop: &StopId) -> Result<Vec<Arrival>, TflError> {
        let predictions = self.arrivals.get(stop).ok_or_else(|| TflError::Api {
            status: 404,
            message: format!("no mock arrivals for stop {}", stop),
        })?;

        Ok(convert_arrivals(predictions.clone()))
    }
}

impl TransitSource for MockTflClient {
    fn stop_points<'a>(
        &'a self,
        _modes: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<StopPoint>, TflError>> {
        let points = self.stop_points.as_ref().clone();
        Box::pin(async move { Ok(points) })
    }

    fn arrivals<'a>(&'a self, stop: &'a StopId) -> BoxFuture<'a, Result<Vec<Arrival>, TflError>> {
        let result = self.get_arrivals(stop);
        Box::pin(async move { result })
    }
}
