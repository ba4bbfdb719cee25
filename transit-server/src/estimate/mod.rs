//! Trip time and fare estimation.
//!
//! Converts a road distance and a baseline (private car) duration into a
//! realistic travel time and fare for a given transport mode. Each mode
//! has one entry in a small rule table: how its time is derived and how
//! its fare is charged.

mod error;
mod factors;
mod trip;

pub use error::EstimateError;
pub use factors::{FareRule, METRO_AVG_SPEED_KMH, ModeFactors, ModeRule, TimingRule, rule_for};
pub use trip::{TripEstimate, TripEstimator, estimate, format_time};
