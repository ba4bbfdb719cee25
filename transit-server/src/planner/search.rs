//! BFS route search algorithm.
//!
//! Finds direct and combined routes between two stops of the transit
//! graph, counting a transfer whenever consecutive hops use different
//! services.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, info, trace};

use crate::domain::{CombinedRoute, DirectRoute, RouteLeg, RouteSearchResult};
use crate::graph::{Edge, StopId, TransitGraph};

use super::config::SearchConfig;
use super::rank::{deduplicate, rank_combined, rank_direct};

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Origin or destination is not a stop in the graph
    #[error("unknown stop: {0:?}")]
    UnknownStop(String),

    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

/// Request for route search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

/// Result of route search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Direct and combined routes, ranked best-first.
    pub routes: RouteSearchResult,

    /// Number of BFS states examined for combined routes.
    pub states_explored: usize,
}

/// BFS state during combined-route search.
#[derive(Debug, Clone)]
struct SearchState<'g> {
    stop: StopId,

    /// Service ridden into `stop`; `None` at the origin.
    service: Option<&'g str>,

    path: Vec<&'g Edge>,

    transfers: usize,
}

/// Route planner over a transit graph.
pub struct Planner<'a> {
    graph: &'a TransitGraph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a TransitGraph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Search for routes between two stops, named case-insensitively.
    ///
    /// When any direct route exists, only combined routes that use the
    /// metro are kept: a bus-only route with transfers is never better
    /// than riding one bus through.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let start = self.resolve(&request.origin)?;
        let end = self.resolve(&request.destination)?;

        if start == end {
            return Err(SearchError::InvalidRequest(
                "origin and destination are the same stop".to_string(),
            ));
        }

        let direct_routes = self.find_direct_routes(start, end);
        let (mut combined_routes, states_explored) = self.find_combined_routes(start, end);

        if !direct_routes.is_empty() {
            combined_routes.retain(CombinedRoute::has_metro);
        }
        combined_routes.truncate(self.config.max_results);

        for route in &mut combined_routes {
            self.fill_leg_options(route);
            debug!(route = %route.describe(), "combined route");
        }

        info!(
            origin = %request.origin,
            destination = %request.destination,
            direct = direct_routes.len(),
            combined = combined_routes.len(),
            states_explored,
            "route search complete"
        );

        Ok(SearchResult {
            routes: RouteSearchResult {
                direct_routes,
                combined_routes,
            },
            states_explored,
        })
    }

    /// Search by stop names, returning only the routes.
    pub fn find_best_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<RouteSearchResult, SearchError> {
        self.search(&SearchRequest::new(origin, destination))
            .map(|result| result.routes)
    }

    fn resolve(&self, name: &str) -> Result<StopId, SearchError> {
        self.graph
            .stop_id(name)
            .ok_or_else(|| SearchError::UnknownStop(name.to_string()))
    }

    /// Routes that ride a single service from `start` to `end`.
    fn find_direct_routes(&self, start: StopId, end: StopId) -> Vec<DirectRoute> {
        let routes = self
            .graph
            .services_at(start)
            .into_iter()
            .filter_map(|(service, mode)| {
                let hops = self.hops_by_service(start, end, service)?;
                Some(DirectRoute {
                    mode,
                    name: service.to_string(),
                    stop_count: hops,
                })
            })
            .collect();

        rank_direct(routes)
    }

    /// Fewest hops from `start` to `end` staying on one service.
    fn hops_by_service(&self, start: StopId, end: StopId, service: &str) -> Option<u32> {
        let mut queue = VecDeque::from([(start, 0u32)]);
        let mut visited = HashSet::from([start]);

        while let Some((stop, hops)) = queue.pop_front() {
            if stop == end {
                return Some(hops);
            }
            for edge in self.graph.neighbors(stop) {
                if edge.service == service && visited.insert(edge.to) {
                    queue.push_back((edge.to, hops + 1));
                }
            }
        }

        None
    }

    /// Combined routes, deduplicated and ranked, with single-service legs.
    ///
    /// Returns the routes and the number of states examined.
    fn find_combined_routes(&self, start: StopId, end: StopId) -> (Vec<CombinedRoute>, usize) {
        let max_transfers = self.config.max_transfers;

        let mut queue = VecDeque::from([SearchState {
            stop: start,
            service: None,
            path: Vec::new(),
            transfers: 0,
        }]);

        // Fewest transfers seen on arrival at (stop, service)
        let mut best_transfers: HashMap<(StopId, Option<&str>), usize> = HashMap::new();
        let mut arrivals: Vec<Vec<&Edge>> = Vec::new();
        let mut explored = 0usize;

        while let Some(state) = queue.pop_front() {
            if explored >= self.config.max_explored {
                debug!(explored, "state limit reached, stopping search");
                break;
            }
            explored += 1;

            let key = (state.stop, state.service);
            if best_transfers
                .get(&key)
                .is_some_and(|&seen| seen < state.transfers)
            {
                continue;
            }

            if state.stop == end {
                arrivals.push(state.path);
                continue;
            }
            best_transfers.insert(key, state.transfers);

            for edge in self.graph.neighbors(state.stop) {
                // No cycles, including back through the origin
                if edge.to == start || state.path.iter().any(|e| e.to == edge.to) {
                    continue;
                }

                let is_transfer = state.service.is_some_and(|s| s != edge.service);
                let transfers = state.transfers + usize::from(is_transfer);
                if transfers > max_transfers {
                    continue;
                }
                if best_transfers
                    .get(&(edge.to, Some(edge.service.as_str())))
                    .is_some_and(|&seen| seen < transfers)
                {
                    continue;
                }

                let mut path = Vec::with_capacity(state.path.len() + 1);
                path.extend_from_slice(&state.path);
                path.push(edge);

                queue.push_back(SearchState {
                    stop: edge.to,
                    service: Some(edge.service.as_str()),
                    path,
                    transfers,
                });
            }
        }

        trace!(arrivals = arrivals.len(), "combined search arrivals");

        let routes: Vec<CombinedRoute> = arrivals
            .iter()
            .filter_map(|path| self.build_route(start, path))
            .collect();

        (rank_combined(deduplicate(routes)), explored)
    }

    /// Group a path of hops into legs, one per run of the same service.
    fn build_route(&self, start: StopId, path: &[&Edge]) -> Option<CombinedRoute> {
        let mut legs = Vec::new();
        let mut run: Vec<&Edge> = Vec::new();
        let mut leg_start = start;
        let mut current = start;

        for &edge in path {
            if run.last().is_some_and(|last| last.service != edge.service) {
                legs.push(self.make_leg(leg_start, &run)?);
                leg_start = current;
                run.clear();
            }
            run.push(edge);
            current = edge.to;
        }
        legs.push(self.make_leg(leg_start, &run)?);

        let total_steps = legs.len() as u32;
        Some(CombinedRoute {
            legs,
            total_stops: path.len() as u32,
            total_steps,
        })
    }

    /// A leg riding `hops`, which all share one service.
    fn make_leg(&self, from: StopId, hops: &[&Edge]) -> Option<RouteLeg> {
        let first = hops.first()?;
        let last = hops.last()?;
        let distance: f64 = hops.iter().map(|e| e.distance_km).sum();

        Some(RouteLeg {
            from: self.graph.stop_name(from)?.to_string(),
            to: self.graph.stop_name(last.to)?.to_string(),
            transport_mode: first.mode,
            options: vec![first.service.clone()],
            stops_count: Some(hops.len() as u32),
            distance_km: Some((distance * 100.0).round() / 100.0),
        })
    }

    /// Add every other service that runs a leg on its own, after the
    /// one the search used.
    fn fill_leg_options(&self, route: &mut CombinedRoute) {
        for leg in &mut route.legs {
            let (Some(from), Some(to)) = (self.graph.stop_id(&leg.from), self.graph.stop_id(&leg.to))
            else {
                continue;
            };

            let alternatives: Vec<String> = self
                .graph
                .services_at(from)
                .into_iter()
                .filter(|&(_, mode)| mode == leg.transport_mode)
                .map(|(service, _)| service)
                .filter(|service| !leg.options.iter().any(|o| o == service))
                .filter(|service| self.hops_by_service(from, to, service).is_some())
                .map(str::to_string)
                .collect();

            leg.options.extend(alternatives);
        }
    }
}
