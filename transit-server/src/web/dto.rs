//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{RouteSearchResult, SearchOutcome, TransportMode};

/// Request to find routes between two stops.
#[derive(Debug, Deserialize)]
pub struct FindRouteRequest {
    /// Origin stop name (`source` is accepted too)
    #[serde(alias = "source")]
    pub origin: String,

    /// Destination stop name
    pub destination: String,
}

/// Route search response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    /// Canonical origin name
    pub source: String,

    /// Canonical destination name
    pub destination: String,

    pub status: String,

    /// "Routes found." or "No routes found."
    pub message: String,

    #[serde(flatten)]
    pub routes: RouteSearchResult,
}

impl RouteResponse {
    /// Wrap a search result, deriving the message from its outcome.
    pub fn new(source: String, destination: String, routes: RouteSearchResult) -> Self {
        let message = match routes.outcome() {
            SearchOutcome::Found => "Routes found.",
            SearchOutcome::NoRouteFound => "No routes found.",
        };
        Self {
            source,
            destination,
            status: "success".to_string(),
            message: message.to_string(),
            routes,
        }
    }
}

/// Query for stop autocomplete.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    /// Text typed so far
    #[serde(default)]
    pub q: String,

    /// Return the whole catalog when `q` is blank
    #[serde(default)]
    pub all_on_empty: bool,

    /// Maximum suggestions returned
    pub limit: Option<usize>,
}

/// Stop autocomplete response.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub stops: Vec<String>,
}

/// Request to estimate a trip.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub distance_km: f64,
    pub baseline_minutes: f64,
    pub mode: TransportMode,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
