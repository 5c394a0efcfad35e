//! Askama templates for the web frontend.

use askama::Template;

use crate::board::{BoardFrame, PlatformGroup};
use crate::directory::StationDirectory;
use crate::domain::StopId;
use crate::selection::APP_NAME;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Board page with the station selector.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub app_name: &'static str,
    pub title: String,
    /// Location encoding the current selection, applied on page load.
    pub location: String,
    pub stations: Vec<StationOption>,
    pub board: BoardPanel,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Board fragment, swapped into the page on refresh.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub board: BoardPanel,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One `<option>` in the station selector.
#[derive(Debug, Clone)]
pub struct StationOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

impl StationOption {
    /// Build options for every stop, marking the selected one.
    pub fn list(directory: &StationDirectory, selected: Option<&StopId>) -> Vec<Self> {
        directory
            .stops()
            .iter()
            .map(|s| Self {
                id: s.id.as_str().to_string(),
                name: s.name.clone(),
                selected: selected == Some(&s.id),
            })
            .collect()
    }
}

/// Board view model.
#[derive(Debug, Clone)]
pub struct BoardPanel {
    /// Status message; empty when showing tables.
    pub message: &'static str,
    pub platforms: Vec<PlatformGroup>,
    /// Render time; empty if never rendered.
    pub updated_at: String,
}

impl BoardPanel {
    /// Create from a published frame.
    pub fn from_frame(frame: &BoardFrame) -> Self {
        Self {
            message: frame.view.message().unwrap_or_default(),
            platforms: frame.view.platforms().to_vec(),
            updated_at: frame.updated_at.clone().unwrap_or_default(),
        }
    }

    /// Whether a status message replaces the tables.
    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }
}

impl IndexTemplate {
    /// Build the page for the given directory and frame.
    pub fn new(directory: &StationDirectory, frame: &BoardFrame, location: String) -> Self {
        let selected = frame.stop.as_ref().map(|s| &s.id);
        Self {
            app_name: APP_NAME,
            title: frame.title.clone(),
            location,
            stations: StationOption::list(directory, selected),
            board: BoardPanel::from_frame(frame),
        }
    }
}
