//! Web layer for the departure board.
//!
//! Serves the board page, the selection endpoint and the current frame as
//! HTML or JSON.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
