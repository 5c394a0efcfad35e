//! Departure board model and the arrivals → board transform.

mod build;
mod lines;

use serde::Serialize;

use crate::domain::Stop;

pub use build::{build_board, group_by_platform, platform_rank};
pub use lines::{DEFAULT_LINE_COLOUR, line_colour};

/// What the board currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BoardView {
    /// No station selected.
    Prompt,
    /// Station selected, first fetch not yet back.
    Loading,
    /// Fetch succeeded but nothing to show.
    NoDepartures,
    /// Fetch or decode failed.
    Error,
    /// Departures grouped by platform, in display order.
    Departures { platforms: Vec<PlatformGroup> },
}

impl BoardView {
    /// Message shown for the non-table states.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            BoardView::Prompt => Some("Select a station to see departures."),
            BoardView::Loading => Some("Loading departures..."),
            BoardView::NoDepartures => Some("No upcoming departures found."),
            BoardView::Error => Some("Error fetching departures. Please try again later."),
            BoardView::Departures { .. } => None,
        }
    }

    /// Platform groups, empty for the non-table states.
    pub fn platforms(&self) -> &[PlatformGroup] {
        match self {
            BoardView::Departures { platforms } => platforms.as_slice(),
            _ => &[],
        }
    }
}

/// Departures at one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformGroup {
    pub platform: String,
    pub rows: Vec<DepartureRow>,
}

/// One row of a platform table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartureRow {
    pub line: String,
    pub line_colour: &'static str,
    pub destination: String,
    /// Whole minutes to arrival, truncated.
    pub minutes: u32,
}

/// One published render of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardFrame {
    /// The selected stop, if any.
    pub stop: Option<Stop>,
    /// Page title reflecting the selection.
    pub title: String,
    pub view: BoardView,
    /// Local time the frame was rendered, as "HH:MM:SS".
    pub updated_at: Option<String>,
}

impl BoardFrame {
    /// The frame shown when nothing is selected.
    pub fn prompt() -> Self {
        Self {
            stop: None,
            title: crate::selection::page_title(None),
            view: BoardView::Prompt,
            updated_at: None,
        }
    }
}
