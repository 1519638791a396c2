//! Web layer for the disorder map.
//!
//! Serves the map page, the reconciled dataset as JSON, and the marker
//! descriptors the page draws.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
