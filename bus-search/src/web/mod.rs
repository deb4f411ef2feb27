//! Web layer for the bus route search.
//!
//! Serves the dashboard page and a small JSON API over the same search
//! pipeline.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
