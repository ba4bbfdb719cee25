//! Route ranking for search results.
//!
//! Metro beats bus in every ordering here: it is faster and unaffected
//! by road traffic.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::{CombinedRoute, DirectRoute};

/// Rank direct routes.
///
/// Direct routes are ranked by:
/// 1. Metro before bus
/// 2. Fewer stops
/// 3. Service name (for a stable order)
pub fn rank_direct(mut routes: Vec<DirectRoute>) -> Vec<DirectRoute> {
    routes.sort_by(|a, b| {
        metro_first(a.mode.is_metro(), b.mode.is_metro())
            .then(a.stop_count.cmp(&b.stop_count))
            .then_with(|| a.name.cmp(&b.name))
    });
    routes
}

/// Rank combined routes.
///
/// Combined routes are ranked by:
/// 1. Routes using the metro first
/// 2. Fewer legs (fewer transfers)
/// 3. Fewer stops in total
/// 4. Leg signature (for a stable order)
pub fn rank_combined(mut routes: Vec<CombinedRoute>) -> Vec<CombinedRoute> {
    routes.sort_by(|a, b| {
        metro_first(a.has_metro(), b.has_metro())
            .then(a.total_steps.cmp(&b.total_steps))
            .then(a.total_stops.cmp(&b.total_stops))
            .then_with(|| a.signature().cmp(&b.signature()))
    });
    routes
}

/// Keep one route per leg signature, the one with the fewest stops.
///
/// Ties keep the route seen first. Output follows first-seen order.
pub fn deduplicate(routes: Vec<CombinedRoute>) -> Vec<CombinedRoute> {
    let mut slot_by_signature: HashMap<String, usize> = HashMap::new();
    let mut result: Vec<CombinedRoute> = Vec::with_capacity(routes.len());

    for route in routes {
        let signature = route.signature();
        match slot_by_signature.get(&signature) {
            Some(&slot) => {
                if route.total_stops < result[slot].total_stops {
                    result[slot] = route;
                }
            }
            None => {
                slot_by_signature.insert(signature, result.len());
                result.push(route);
            }
        }
    }

    result
}

fn metro_first(a_metro: bool, b_metro: bool) -> Ordering {
    b_metro.cmp(&a_metro)
}
