//! The trip estimator.

use serde::Serialize;

use crate::domain::TransportMode;

use super::error::EstimateError;
use super::factors::{ModeFactors, TimingRule, rule_for};

/// Estimated time and fare for one trip in one mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripEstimate {
    /// Estimated travel time, rounded to whole minutes.
    pub time_minutes: u32,

    /// Fare in BDT; `None` for modes without a modelled tariff.
    #[serde(rename = "fareBDT")]
    pub fare_bdt: Option<u32>,

    /// e.g. "45 min" or "2 hr 5 min".
    pub formatted_time: String,
}

/// Computes trip estimates from a set of mode factors.
#[derive(Debug, Clone, Default)]
pub struct TripEstimator {
    factors: ModeFactors,
}

impl TripEstimator {
    /// Create an estimator, rejecting non-positive factors.
    pub fn new(factors: ModeFactors) -> Result<Self, EstimateError> {
        factors.validate()?;
        Ok(Self { factors })
    }

    /// Estimate travel time and fare.
    ///
    /// `baseline_minutes` is the unadjusted road duration (private car).
    /// Metro ignores it and uses a fixed average speed instead.
    pub fn estimate(
        &self,
        distance_km: f64,
        baseline_minutes: f64,
        mode: TransportMode,
    ) -> Result<TripEstimate, EstimateError> {
        check_input("distance_km", distance_km)?;
        check_input("baseline_minutes", baseline_minutes)?;

        let rule = rule_for(mode);
        let minutes = match rule.timing {
            TimingRule::Scaled => baseline_minutes * self.factors.factor(mode),
            TimingRule::FixedSpeed { kmh } => distance_km / kmh * 60.0,
        };

        Ok(TripEstimate {
            time_minutes: minutes.round() as u32,
            fare_bdt: rule.fare.fare(distance_km),
            formatted_time: format_time(minutes),
        })
    }
}

/// Estimate with the default mode factors.
///
/// # Examples
///
/// ```
/// use transit_server::domain::TransportMode;
/// use transit_server::estimate::estimate;
///
/// let trip = estimate(10.0, 20.0, TransportMode::Bus).unwrap();
/// assert_eq!(trip.time_minutes, 30);
/// assert_eq!(trip.fare_bdt, Some(25));
/// assert_eq!(trip.formatted_time, "30 min");
/// ```
pub fn estimate(
    distance_km: f64,
    baseline_minutes: f64,
    mode: TransportMode,
) -> Result<TripEstimate, EstimateError> {
    TripEstimator::default().estimate(distance_km, baseline_minutes, mode)
}

/// Format a duration given in (fractional) minutes.
///
/// Under an hour the whole value is rounded. From an hour up, the hours
/// are `floor(minutes / 60)` and the minutes are `round(minutes) mod 60`.
pub fn format_time(minutes: f64) -> String {
    let minutes = minutes.max(0.0);
    let rounded = minutes.round() as u64;
    if minutes < 60.0 {
        format!("{rounded} min")
    } else {
        let hours = (minutes / 60.0).floor() as u64;
        format!("{hours} hr {} min", rounded % 60)
    }
}

fn check_input(field: &'static str, value: f64) -> Result<(), EstimateError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EstimateError::InvalidInput { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metro_ignores_baseline() {
        let trip = estimate(10.0, 20.0, TransportMode::Metro).unwrap();
        assert_eq!(trip.time_minutes, 13); // 10 / 45 * 60 = 13.33
        assert_eq!(trip.fare_bdt, Some(70));
        assert_eq!(trip.formatted_time, "13 min");

        let other = estimate(10.0, 999.0, TransportMode::Metro).unwrap();
        assert_eq!(other.time_minutes, 13);
    }

    #[test]
    fn bus_scales_baseline() {
        let trip = estimate(10.0, 20.0, TransportMode::Bus).unwrap();
        assert_eq!(trip.time_minutes, 30);
        assert_eq!(trip.fare_bdt, Some(25));
    }

    #[test]
    fn rickshaw_and_car() {
        let rickshaw = estimate(3.0, 10.0, TransportMode::Rickshaw).unwrap();
        assert_eq!(rickshaw.time_minutes, 12);
        assert_eq!(rickshaw.fare_bdt, None);

        let car = estimate(3.0, 10.0, TransportMode::Car).unwrap();
        assert_eq!(car.time_minutes, 10);
        assert_eq!(car.fare_bdt, None);
    }

    #[test]
    fn short_bus_trip_pays_minimum() {
        let trip = estimate(0.5, 3.0, TransportMode::Bus).unwrap();
        assert_eq!(trip.fare_bdt, Some(10));
    }

    #[test]
    fn long_trip_formats_hours() {
        let trip = estimate(30.0, 90.0, TransportMode::Bus).unwrap();
        assert_eq!(trip.time_minutes, 135);
        assert_eq!(trip.formatted_time, "2 hr 15 min");
    }

    #[test]
    fn custom_factors() {
        let factors = ModeFactors::default().with_factor(TransportMode::Bus, 2.0);
        let estimator = TripEstimator::new(factors).unwrap();
        let trip = estimator.estimate(10.0, 20.0, TransportMode::Bus).unwrap();
        assert_eq!(trip.time_minutes, 40);
    }

    #[test]
    fn estimator_rejects_bad_factors() {
        let factors = ModeFactors::default().with_factor(TransportMode::Bus, -1.0);
        assert!(TripEstimator::new(factors).is_err());
    }

    #[test]
    fn negative_distance_is_invalid() {
        let err = estimate(-1.0, 20.0, TransportMode::Bus).unwrap_err();
        assert_eq!(
            err,
            EstimateError::InvalidInput {
                field: "distance_km",
                value: -1.0
            }
        );
    }

    #[test]
    fn nan_and_infinite_are_invalid() {
        assert!(matches!(
            estimate(1.0, f64::NAN, TransportMode::Car),
            Err(EstimateError::InvalidInput {
                field: "baseline_minutes",
                ..
            })
        ));
        assert!(estimate(f64::INFINITY, 1.0, TransportMode::Metro).is_err());
    }

    #[test]
    fn zero_inputs() {
        let trip = estimate(0.0, 0.0, TransportMode::Walking).unwrap();
        assert_eq!(trip.time_minutes, 0);
        assert_eq!(trip.formatted_time, "0 min");
    }

    #[test]
    fn format_time_examples() {
        assert_eq!(format_time(45.0), "45 min");
        assert_eq!(format_time(125.0), "2 hr 5 min");
        assert_eq!(format_time(60.0), "1 hr 0 min");
        assert_eq!(format_time(13.33), "13 min");
        assert_eq!(format_time(119.7), "1 hr 0 min");
    }

    #[test]
    fn format_time_branches_on_unrounded_minutes() {
        assert_eq!(format_time(59.4), "59 min");
        assert_eq!(format_time(59.6), "60 min");
        assert_eq!(format_time(60.4), "1 hr 0 min");
        assert_eq!(format_time(61.5), "1 hr 2 min");
    }

    #[test]
    fn bus_just_under_an_hour() {
        // 39.8 * 1.5 = 59.7
        let trip = estimate(5.0, 39.8, TransportMode::Bus).unwrap();
        assert_eq!(trip.time_minutes, 60);
        assert_eq!(trip.formatted_time, "60 min");
    }

    #[test]
    fn serializes_for_the_wire() {
        let trip = estimate(10.0, 20.0, TransportMode::Metro).unwrap();
        let json = serde_json::to_value(&trip).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"timeMinutes": 13, "fareBDT": 70, "formattedTime": "13 min"})
        );

        let walk = estimate(1.0, 12.0, TransportMode::Walking).unwrap();
        let json = serde_json::to_value(&walk).unwrap();
        assert_eq!(json["fareBDT"], serde_json::Value::Null);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn mode_strategy() -> impl Strategy<Value = TransportMode> {
        prop::sample::select(TransportMode::ALL.to_vec())
    }

    proptest! {
        /// Bus never charges less than the boarding minimum
        #[test]
        fn bus_fare_at_least_minimum(d in 0.0f64..500.0, t in 0.0f64..600.0) {
            let trip = estimate(d, t, TransportMode::Bus).unwrap();
            prop_assert!(trip.fare_bdt.unwrap() >= 10);
        }

        /// Metro never charges less than the base fare
        #[test]
        fn metro_fare_at_least_base(d in 0.0f64..500.0, t in 0.0f64..600.0) {
            let trip = estimate(d, t, TransportMode::Metro).unwrap();
            prop_assert!(trip.fare_bdt.unwrap() >= 20);
        }

        /// Fares never decrease with distance
        #[test]
        fn fare_monotonic_in_distance(a in 0.0f64..200.0, b in 0.0f64..200.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            for mode in [TransportMode::Bus, TransportMode::Metro] {
                let near = estimate(lo, 10.0, mode).unwrap().fare_bdt;
                let far = estimate(hi, 10.0, mode).unwrap().fare_bdt;
                prop_assert!(near <= far);
            }
        }

        /// The minutes shown agree with the rounded minute count
        #[test]
        fn formatted_matches_minutes(d in 0.0f64..200.0, t in 0.0f64..600.0, mode in mode_strategy()) {
            let trip = estimate(d, t, mode).unwrap();
            let m = trip.time_minutes;
            let text = trip.formatted_time.clone();
            match text.split_once(" hr ") {
                None => prop_assert_eq!(text.clone(), format!("{m} min")),
                Some((hours, rest)) => {
                    let hours: u32 = hours.parse().unwrap();
                    prop_assert!(hours >= 1 && hours <= m / 60);
                    prop_assert_eq!(rest, format!("{} min", m % 60));
                }
            }
        }

        /// Values under an hour never show hours
        #[test]
        fn under_an_hour_is_minutes_only(x in 0.0f64..60.0) {
            prop_assert!(format_time(x).ends_with(" min"));
            prop_assert!(!format_time(x).contains("hr"));
        }

        /// Negative distances are always rejected
        #[test]
        fn negative_distance_rejected(d in -1000.0f64..-0.0001, mode in mode_strategy()) {
            prop_assert!(estimate(d, 10.0, mode).is_err());
        }
    }
}
