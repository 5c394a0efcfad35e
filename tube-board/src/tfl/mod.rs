//! TfL Unified API client.
//!
//! Two endpoints are used:
//! - `StopPoint/Mode/{modes}` for the station directory
//! - `StopPoint/{id}/Arrivals` for live predictions at one stop
//!
//! Both live and file-backed sources implement [`TransitSource`], which is
//! what the directory loader and the poller depend on.

mod client;
mod convert;
mod error;
mod mock;
mod types;

use futures::future::BoxFuture;

use crate::domain::{Arrival, StopId};

pub use client::{TflClient, TflConfig};
pub use convert::{convert_arrivals, convert_stop_points};
pub use error::TflError;
pub use mock::MockTflClient;
pub use types::{ArrivalPrediction, StopPoint, StopPointsResponse};

/// A source of stop records and arrival predictions.
///
/// Boxed futures keep the trait object-safe so the poller can hold an
/// `Arc<dyn TransitSource>` regardless of backend.
pub trait TransitSource: Send + Sync + 'static {
    /// Fetch raw stop records for the given transport modes.
    fn stop_points<'a>(
        &'a self,
        modes: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<StopPoint>, TflError>>;

    /// Fetch arrival predictions for one stop.
    fn arrivals<'a>(&'a self, stop: &'a StopId) -> BoxFuture<'a, Result<Vec<Arrival>, TflError>>;
}
