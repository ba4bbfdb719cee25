//! Domain types for the transit planner.
//!
//! This module contains the canonical shapes that every other layer
//! speaks: transport modes and the route search result model. Wire
//! variants from backends are decoded elsewhere and never leak past
//! the normalizer, so code holding these types can trust their shape.

mod mode;
mod route;

pub use mode::{InvalidTransportMode, RouteMode, TransportMode, is_metro_service};
pub use route::{CombinedRoute, DirectRoute, RouteLeg, RouteSearchResult, SearchOutcome};
