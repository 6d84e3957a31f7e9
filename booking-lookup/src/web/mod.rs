//! Web layer for the booking lookup.
//!
//! Serves the root view as HTML, answers form actions with redirects back to
//! it, and exposes the search and selection state as JSON.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
