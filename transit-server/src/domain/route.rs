//! Canonical route search result model.

use serde::Serialize;

use super::RouteMode;

/// A single-vehicle, no-transfer path between origin and destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectRoute {
    #[serde(rename = "type")]
    pub mode: RouteMode,

    /// Service name (e.g. "MRT Line 6").
    pub name: String,

    /// Number of stops travelled.
    pub stop_count: u32,
}

/// One continuous segment of a combined route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    pub transport_mode: RouteMode,

    /// Interchangeable services for this leg, best first.
    pub options: Vec<String>,

    /// Stops travelled on this leg, when the backend reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops_count: Option<u32>,

    /// Track length of the leg in km, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl RouteLeg {
    /// A leg can only be taken if at least one service runs it.
    pub fn is_usable(&self) -> bool {
        !self.options.is_empty()
    }
}

/// A path with one or more transfers, as an ordered sequence of legs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedRoute {
    pub legs: Vec<RouteLeg>,
    pub total_stops: u32,
    pub total_steps: u32,
}

impl CombinedRoute {
    /// Whether any leg of this route rides the metro.
    pub fn has_metro(&self) -> bool {
        self.legs.iter().any(|leg| leg.transport_mode.is_metro())
    }

    /// Identity of the route by its leg endpoints, e.g. `A->B|B->C|`.
    pub fn signature(&self) -> String {
        let mut sig = String::new();
        for leg in &self.legs {
            sig.push_str(&leg.from);
            sig.push_str("->");
            sig.push_str(&leg.to);
            sig.push('|');
        }
        sig
    }

    /// Human-readable one-line-per-leg summary.
    pub fn describe(&self) -> String {
        self.legs
            .iter()
            .map(|leg| {
                let service = leg.options.first().map(String::as_str).unwrap_or("?");
                format!(
                    "{} -> {} ({}: {})",
                    leg.from, leg.to, leg.transport_mode, service
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Whether a search produced anything to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found,
    /// A valid, empty answer. Not a transport failure.
    NoRouteFound,
}

/// Direct and combined routes for one origin/destination query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSearchResult {
    pub direct_routes: Vec<DirectRoute>,
    pub combined_routes: Vec<CombinedRoute>,
}

impl RouteSearchResult {
    pub fn is_empty(&self) -> bool {
        self.direct_routes.is_empty() && self.combined_routes.is_empty()
    }

    pub fn outcome(&self) -> SearchOutcome {
        if self.is_empty() {
            SearchOutcome::NoRouteFound
        } else {
            SearchOutcome::Found
        }
    }
}
