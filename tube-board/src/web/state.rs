//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::directory::StationDirectory;
use crate::poller::Poller;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Selectable stops, loaded once at startup
    pub directory: StationDirectory,

    /// The board's poller. Selection changes go through this lock.
    pub poller: Arc<Mutex<Poller>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(directory: StationDirectory, poller: Poller) -> Self {
        Self {
            directory,
            poller: Arc::new(Mutex::new(poller)),
        }
    }
}
