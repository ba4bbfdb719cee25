//! Web layer for the transit trip planner.
//!
//! Provides HTTP endpoints for route search, stop autocomplete and trip
//! estimates.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, RouteSource};
