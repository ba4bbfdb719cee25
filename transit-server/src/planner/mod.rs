//! Route planner using BFS search over the transit graph.
//!
//! This module answers: "which services take me from this stop to that
//! one, and where do I change?"
//!
//! Direct routes ride one service end to end. Combined routes are found
//! by a breadth-first search over (stop, current service) states that
//! counts transfers, then grouped into legs, deduplicated and ranked.

mod config;
mod rank;
mod search;

pub use config::SearchConfig;
pub use rank::{deduplicate, rank_combined, rank_direct};
pub use search::{Planner, SearchError, SearchRequest, SearchResult};
