//! Transit network graph.
//!
//! Stops are nodes; every service (bus company or metro line) that runs
//! between two consecutive stops contributes a directed edge. The graph
//! is loaded once from `transport_graph.json` and shared read-only.

mod error;
mod network;

pub use error::GraphError;
pub use network::{Edge, StopId, TransitGraph};
