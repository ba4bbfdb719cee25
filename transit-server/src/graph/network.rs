//! Adjacency-list graph of stops and service edges.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::RouteMode;

use super::error::GraphError;

/// Index of a stop in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub usize);

/// A directed hop from one stop to the next on a named service.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Stop this edge arrives at.
    pub to: StopId,

    /// Service name (e.g. "MRT Line 6", "Raida").
    pub service: String,

    pub mode: RouteMode,

    /// Hop length in km.
    pub distance_km: f64,
}

/// On-disk graph format: `{"nodes": [{"id": ..}], "links": [..]}`.
#[derive(Debug, Default, Deserialize)]
struct GraphFile {
    #[serde(default)]
    nodes: Vec<NodeDto>,
    #[serde(default)]
    links: Vec<LinkDto>,
}

/// A node; its `id` is the stop name.
#[derive(Debug, Deserialize)]
struct NodeDto {
    id: String,
}

#[derive(Debug, Deserialize)]
struct LinkDto {
    source: String,
    target: String,
    #[serde(default = "default_transport")]
    transport: String,
    /// Falls back to classifying `transport` by name.
    #[serde(default)]
    mode: Option<RouteMode>,
    #[serde(default = "default_distance")]
    distance: f64,
}

fn default_transport() -> String {
    "Unknown".to_string()
}

fn default_distance() -> f64 {
    1.0
}

/// Stops and the services connecting them.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    names: Vec<String>,
    by_name: HashMap<String, StopId>,
    adjacency: Vec<Vec<Edge>>,
}

impl TransitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a graph from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse a graph from JSON text.
    ///
    /// Links naming a stop that is not among the nodes are skipped.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let file: GraphFile = serde_json::from_str(json).map_err(|e| GraphError::Json {
            message: e.to_string(),
        })?;

        let mut graph = Self::new();
        for node in file.nodes {
            graph.add_stop(&node.id);
        }

        let mut skipped = 0usize;
        for link in file.links {
            let (Some(from), Some(to)) = (graph.stop_id(&link.source), graph.stop_id(&link.target))
            else {
                debug!(source = %link.source, target = %link.target, "skipping link to unknown stop");
                skipped += 1;
                continue;
            };
            let mode = link
                .mode
                .unwrap_or_else(|| RouteMode::for_service(&link.transport));
            graph.add_edge_with_mode(from, to, &link.transport, mode, link.distance);
        }

        if skipped > 0 {
            warn!(skipped, "transit graph has links referencing unknown stops");
        }

        Ok(graph)
    }

    /// Add a stop, or return the existing one with the same name
    /// (ignoring case).
    pub fn add_stop(&mut self, name: &str) -> StopId {
        let key = name.to_lowercase();
        if let Some(&id) = self.by_name.get(&key) {
            return id;
        }
        let id = StopId(self.names.len());
        self.names.push(name.to_string());
        self.adjacency.push(Vec::new());
        self.by_name.insert(key, id);
        id
    }

    /// Add a directed edge. The service's mode is derived from its name.
    pub fn add_edge(&mut self, from: StopId, to: StopId, service: &str, distance_km: f64) {
        let mode = RouteMode::for_service(service);
        self.add_edge_with_mode(from, to, service, mode, distance_km);
    }

    /// Add a directed edge with an explicit mode.
    pub fn add_edge_with_mode(
        &mut self,
        from: StopId,
        to: StopId,
        service: &str,
        mode: RouteMode,
        distance_km: f64,
    ) {
        if let Some(edges) = self.adjacency.get_mut(from.0) {
            edges.push(Edge {
                to,
                service: service.to_string(),
                mode,
                distance_km,
            });
        }
    }

    /// Look up a stop by name, ignoring case.
    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    pub fn stop_name(&self, id: StopId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    /// Outgoing edges of a stop.
    pub fn neighbors(&self, id: StopId) -> &[Edge] {
        self.adjacency.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edges from `from` directly to `to`, one per service.
    pub fn edges_between(&self, from: StopId, to: StopId) -> impl Iterator<Item = &Edge> {
        self.neighbors(from).iter().filter(move |e| e.to == to)
    }

    /// Services leaving a stop with their modes, sorted by name.
    pub fn services_at(&self, id: StopId) -> BTreeMap<&str, RouteMode> {
        self.neighbors(id)
            .iter()
            .map(|e| (e.service.as_str(), e.mode))
            .collect()
    }

    /// Stop names in insertion order.
    pub fn stop_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn stop_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "nodes": [{"id": "Uttara North"}, {"id": "Agargaon"}, {"id": "Farmgate"}],
        "links": [
            {"source": "Uttara North", "target": "Agargaon", "mode": "METRO", "transport": "MRT Line 6", "cost": 60, "distance": 11.7},
            {"source": "Agargaon", "target": "Farmgate", "mode": "BUS", "transport": "Raida"},
            {"source": "Agargaon", "target": "Nowhere", "mode": "BUS", "transport": "Ghost"}
        ]
    }"#;

    #[test]
    fn parse_nodes_and_links() {
        let graph = TransitGraph::from_json(SAMPLE).unwrap();
        assert_eq!(graph.stop_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let uttara = graph.stop_id("Uttara North").unwrap();
        let edges = graph.neighbors(uttara);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].service, "MRT Line 6");
        assert_eq!(edges[0].mode, RouteMode::Metro);
        assert_eq!(edges[0].distance_km, 11.7);
    }

    #[test]
    fn link_mode_overrides_service_name() {
        let graph = TransitGraph::from_json(
            r#"{"nodes": [{"id": "Kamalapur"}, {"id": "Tongi"}], "links": [
                {"source": "Kamalapur", "target": "Tongi", "mode": "METRO", "transport": "Commuter Rail", "distance": 22.4}
            ]}"#,
        )
        .unwrap();
        let from = graph.stop_id("Kamalapur").unwrap();
        let edge = &graph.neighbors(from)[0];
        assert_eq!(edge.mode, RouteMode::Metro);
        assert_eq!(graph.services_at(from).get("Commuter Rail"), Some(&RouteMode::Metro));
    }

    #[test]
    fn link_defaults() {
        let graph = TransitGraph::from_json(
            r#"{"nodes": [{"id": "A"}, {"id": "B"}], "links": [{"source": "A", "target": "B"}]}"#,
        )
        .unwrap();
        let a = graph.stop_id("A").unwrap();
        let edge = &graph.neighbors(a)[0];
        assert_eq!(edge.service, "Unknown");
        assert_eq!(edge.distance_km, 1.0);
        assert_eq!(edge.mode, RouteMode::Bus);
    }

    #[test]
    fn missing_nodes_is_empty_graph() {
        let graph = TransitGraph::from_json("{}").unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let graph = TransitGraph::from_json(SAMPLE).unwrap();
        assert_eq!(graph.stop_id("farmgate"), graph.stop_id("FARMGATE"));
        assert!(graph.stop_id("farmgate").is_some());
        assert!(graph.stop_id("Gulshan").is_none());

        let id = graph.stop_id("agargaon").unwrap();
        assert_eq!(graph.stop_name(id), Some("Agargaon"));
    }

    #[test]
    fn add_stop_dedups_by_name() {
        let mut graph = TransitGraph::new();
        let a = graph.add_stop("Shahbag");
        let b = graph.add_stop("shahbag");
        assert_eq!(a, b);
        assert_eq!(graph.stop_count(), 1);
    }

    #[test]
    fn services_and_edges_between() {
        let mut graph = TransitGraph::new();
        let a = graph.add_stop("A");
        let b = graph.add_stop("B");
        graph.add_edge(a, b, "Raida", 1.0);
        graph.add_edge(a, b, "Bikash", 1.0);
        graph.add_edge(a, b, "Raida", 1.0);

        let services: Vec<_> = graph.services_at(a).into_keys().collect();
        assert_eq!(services, vec!["Bikash", "Raida"]);
        assert_eq!(graph.edges_between(a, b).count(), 3);
        assert_eq!(graph.edges_between(b, a).count(), 0);
        assert!(graph.services_at(b).is_empty());
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transport_graph.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let graph = TransitGraph::load(&path).unwrap();
        assert_eq!(graph.stop_count(), 3);
    }

    #[test]
    fn load_errors() {
        assert!(matches!(
            TransitGraph::load("/nonexistent/transport_graph.json"),
            Err(GraphError::Io { .. })
        ));
        assert!(matches!(
            TransitGraph::from_json("[1, 2]"),
            Err(GraphError::Json { .. })
        ));
    }
}
