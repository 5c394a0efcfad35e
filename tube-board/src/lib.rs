//! Live departure board for London Underground stations.
//!
//! Loads the station directory from the TfL Unified API, polls arrivals
//! for the selected station every 30 seconds, and serves the board grouped
//! by platform.

pub mod board;
pub mod config;
pub mod directory;
pub mod domain;
pub mod poller;
pub mod selection;
pub mod tfl;
pub mod web;
