//! Transport mode types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown transport mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport mode: {0:?}")]
pub struct InvalidTransportMode(String);

/// A mode of travel that trip estimates can be computed for.
///
/// # Examples
///
/// ```
/// use transit_server::domain::TransportMode;
///
/// let mode: TransportMode = "Metro".parse().unwrap();
/// assert_eq!(mode, TransportMode::Metro);
/// assert_eq!(mode.as_str(), "metro");
///
/// assert!("tram".parse::<TransportMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Bus,
    Car,
    Metro,
    Rickshaw,
    Walking,
}

impl TransportMode {
    /// Every mode, in table order.
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Bus,
        TransportMode::Car,
        TransportMode::Metro,
        TransportMode::Rickshaw,
        TransportMode::Walking,
    ];

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Bus => "bus",
            TransportMode::Car => "car",
            TransportMode::Metro => "metro",
            TransportMode::Rickshaw => "rickshaw",
            TransportMode::Walking => "walking",
        }
    }
}

impl FromStr for TransportMode {
    type Err = InvalidTransportMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        TransportMode::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| InvalidTransportMode(s.to_string()))
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of vehicle serving a route or leg, as shown in search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteMode {
    #[serde(rename = "METRO", alias = "metro", alias = "Metro")]
    Metro,
    #[serde(rename = "BUS", alias = "bus", alias = "Bus")]
    Bus,
}

impl RouteMode {
    /// Classify a service by its name.
    pub fn for_service(name: &str) -> Self {
        if is_metro_service(name) {
            RouteMode::Metro
        } else {
            RouteMode::Bus
        }
    }

    pub fn is_metro(&self) -> bool {
        matches!(self, RouteMode::Metro)
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteMode::Metro => f.write_str("METRO"),
            RouteMode::Bus => f.write_str("BUS"),
        }
    }
}

/// Whether a service name denotes a metro line (e.g. "MRT Line 6").
pub fn is_metro_service(name: &str) -> bool {
    name.contains("MRT") || name.contains("Metro")
}
