//! Route result normalization.
//!
//! Route-search backends have answered in two naming conventions over
//! time: camelCase (`directRoutes`, `totalStops`) and snake_case
//! (`direct_routes`, `total_stops`). The raw types here accept either and
//! are converted into the canonical [`RouteSearchResult`] immediately, so
//! neither convention travels further than this module.
//!
//! A payload may carry the same field in both conventions. The camelCase
//! value wins unless it is `null`, in which case the snake_case value is
//! used.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::{CombinedRoute, DirectRoute, RouteLeg, RouteMode, RouteSearchResult};

/// Error decoding a backend route payload.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// The payload is not a route result in any known convention
    #[error("malformed route payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Route result as sent by a backend, in either convention.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRouteResult {
    #[serde(default, alias = "direct_routes")]
    pub direct_routes: Option<Vec<RawDirectRoute>>,

    #[serde(default, alias = "combined_routes")]
    pub combined_routes: Option<Vec<RawCombinedRoute>>,
}

/// A direct route as sent by a backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDirectRoute {
    #[serde(rename = "type")]
    pub mode: RouteMode,

    pub name: String,

    #[serde(default, alias = "stops", alias = "stop_count")]
    pub stop_count: Option<u32>,
}

/// A combined route as sent by a backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCombinedRoute {
    #[serde(default)]
    pub legs: Option<Vec<RawRouteLeg>>,

    #[serde(default, alias = "total_stops")]
    pub total_stops: Option<u32>,

    #[serde(default, alias = "total_steps")]
    pub total_steps: Option<u32>,
}

/// A leg of a combined route as sent by a backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRouteLeg {
    pub from: String,
    pub to: String,

    #[serde(alias = "transport_mode")]
    pub transport_mode: RouteMode,

    #[serde(default)]
    pub options: Option<Vec<String>>,

    #[serde(default, alias = "stops_count")]
    pub stops_count: Option<u32>,

    #[serde(default, alias = "distance_km")]
    pub distance_km: Option<f64>,
}

/// Convert a raw backend result into the canonical shape.
///
/// Absent collections become empty, option order is kept as sent, and
/// combined routes without any legs are dropped.
pub fn normalize(raw: RawRouteResult) -> RouteSearchResult {
    let direct_routes = raw
        .direct_routes
        .unwrap_or_default()
        .into_iter()
        .map(|r| DirectRoute {
            mode: r.mode,
            name: r.name,
            stop_count: r.stop_count.unwrap_or(0),
        })
        .collect();

    let combined_routes = raw
        .combined_routes
        .unwrap_or_default()
        .into_iter()
        .filter_map(normalize_combined)
        .collect();

    RouteSearchResult {
        direct_routes,
        combined_routes,
    }
}

fn normalize_combined(raw: RawCombinedRoute) -> Option<CombinedRoute> {
    let legs: Vec<RouteLeg> = raw
        .legs
        .unwrap_or_default()
        .into_iter()
        .map(|leg| RouteLeg {
            from: leg.from,
            to: leg.to,
            transport_mode: leg.transport_mode,
            options: leg.options.unwrap_or_default(),
            stops_count: leg.stops_count,
            distance_km: leg.distance_km,
        })
        .collect();

    if legs.is_empty() {
        debug!("dropping combined route without legs");
        return None;
    }

    Some(CombinedRoute {
        legs,
        total_stops: raw.total_stops.unwrap_or(0),
        total_steps: raw.total_steps.unwrap_or(0),
    })
}

/// Canonical key and the alias it absorbs.
const KEY_ALIASES: &[(&str, &str)] = &[
    ("directRoutes", "direct_routes"),
    ("combinedRoutes", "combined_routes"),
    ("totalStops", "total_stops"),
    ("totalSteps", "total_steps"),
    ("transportMode", "transport_mode"),
    ("stopsCount", "stops_count"),
    ("distanceKm", "distance_km"),
    ("stopCount", "stop_count"),
    ("stopCount", "stops"),
];

/// Fold aliased keys into their canonical key, at every depth.
fn merge_aliased_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (canonical, alias) in KEY_ALIASES {
                let Some(aliased) = map.remove(*alias) else {
                    continue;
                };
                if map.get(*canonical).is_none_or(Value::is_null) {
                    map.insert(canonical.to_string(), aliased);
                }
            }
            map.values_mut().for_each(merge_aliased_keys);
        }
        Value::Array(items) => items.iter_mut().for_each(merge_aliased_keys),
        _ => {}
    }
}

/// Decode and normalize a JSON value.
pub fn normalize_value(mut value: Value) -> Result<RouteSearchResult, NormalizeError> {
    merge_aliased_keys(&mut value);
    let raw: RawRouteResult = serde_json::from_value(value)?;
    Ok(normalize(raw))
}

/// Decode and normalize a JSON body.
pub fn normalize_slice(body: &[u8]) -> Result<RouteSearchResult, NormalizeError> {
    normalize_value(serde_json::from_slice(body)?)
}
