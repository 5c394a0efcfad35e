//! Restorable selection state.
//!
//! The selected stop is mirrored into a single `station` query parameter so
//! a board can be shared or bookmarked. The browser applies the location
//! with `history.replaceState`, so no history entries are added.

use serde::Deserialize;

use crate::domain::{InvalidStopId, Stop, StopId};

/// Application name shown in the page title.
pub const APP_NAME: &str = "Tube Departures";

/// Query parameter holding the selected stop id.
pub const STATION_PARAM: &str = "station";

/// Query string / form body carrying a selection.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    /// Selected stop id. Missing or empty means no selection.
    pub station: Option<String>,
}

/// The currently selected stop, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(Option<StopId>);

impl Selection {
    /// No station chosen.
    pub fn none() -> Self {
        Self(None)
    }

    /// A chosen station.
    pub fn of(id: StopId) -> Self {
        Self(Some(id))
    }

    /// Parse the raw `station` parameter. Missing or blank is no selection.
    pub fn parse(raw: Option<&str>) -> Result<Self, InvalidStopId> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::none()),
            Some(id) => StopId::parse(id).map(Self::of),
        }
    }

    /// The selected stop id.
    pub fn stop_id(&self) -> Option<&StopId> {
        self.0.as_ref()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Page location encoding this selection.
    ///
    /// ```
    /// use tube_board::domain::StopId;
    /// use tube_board::selection::Selection;
    ///
    /// assert_eq!(Selection::none().location(), "/");
    /// let bank = StopId::parse("940GZZLUBNK").unwrap();
    /// assert_eq!(Selection::of(bank).location(), "/?station=940GZZLUBNK");
    /// ```
    pub fn location(&self) -> String {
        match &self.0 {
            // Stop ids are URL-safe by construction.
            Some(id) => format!("/?{}={}", STATION_PARAM, id.as_str()),
            None => "/".to_string(),
        }
    }
}

impl TryFrom<&SelectionQuery> for Selection {
    type Error = InvalidStopId;

    fn try_from(query: &SelectionQuery) -> Result<Self, Self::Error> {
        Self::parse(query.station.as_deref())
    }
}

/// Page title for the given selection.
pub fn page_title(stop: Option<&Stop>) -> String {
    match stop {
        Some(stop) => format!("{} – {}", APP_NAME, stop.name),
        None => APP_NAME.to_string(),
    }
}
