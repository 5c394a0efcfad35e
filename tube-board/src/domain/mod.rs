//! Domain types for the departure board.
//!
//! These are the validated forms of what the transit API sends us. The
//! API DTOs live in `tfl::types`; conversion happens in `tfl::convert`.

mod arrival;
mod stop;

pub use arrival::{Arrival, UNKNOWN_PLATFORM};
pub use stop::{InvalidStopId, Stop, StopId};
