//! Per-mode adjustment factors and pricing rules.

use serde::{Deserialize, Serialize};

use crate::domain::TransportMode;

use super::error::EstimateError;

/// Average metro speed used instead of the road duration (km/h).
pub const METRO_AVG_SPEED_KMH: f64 = 45.0;

/// Regulated bus tariff (BDT per km).
const BUS_RATE_PER_KM: f64 = 2.42;

/// Minimum bus boarding charge (BDT).
const BUS_MIN_FARE: u32 = 10;

/// Metro per-km increment (BDT per km).
const METRO_RATE_PER_KM: f64 = 5.0;

/// Flat metro base fare, also its minimum (BDT).
const METRO_BASE_FARE: u32 = 20;

/// Multipliers applied to the baseline duration, one per mode.
///
/// The baseline is a private-car road duration, so `car` is 1.0. Buses
/// lose time loading and in traffic; rickshaws are slow but slip through
/// jams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeFactors {
    pub bus: f64,
    pub car: f64,
    pub metro: f64,
    pub rickshaw: f64,
    pub walking: f64,
}

impl ModeFactors {
    /// The multiplier for a mode.
    pub fn factor(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Bus => self.bus,
            TransportMode::Car => self.car,
            TransportMode::Metro => self.metro,
            TransportMode::Rickshaw => self.rickshaw,
            TransportMode::Walking => self.walking,
        }
    }

    /// Override the multiplier for one mode.
    pub fn with_factor(mut self, mode: TransportMode, value: f64) -> Self {
        let slot = match mode {
            TransportMode::Bus => &mut self.bus,
            TransportMode::Car => &mut self.car,
            TransportMode::Metro => &mut self.metro,
            TransportMode::Rickshaw => &mut self.rickshaw,
            TransportMode::Walking => &mut self.walking,
        };
        *slot = value;
        self
    }

    /// Check that every factor is finite and strictly positive.
    pub fn validate(&self) -> Result<(), EstimateError> {
        for mode in TransportMode::ALL {
            let value = self.factor(mode);
            if !(value.is_finite() && value > 0.0) {
                return Err(EstimateError::InvalidFactor { mode, value });
            }
        }
        Ok(())
    }
}

impl Default for ModeFactors {
    fn default() -> Self {
        Self {
            bus: 1.5,
            car: 1.0,
            metro: 1.0,
            rickshaw: 1.2,
            walking: 1.0,
        }
    }
}

/// How a mode's travel time is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingRule {
    /// Baseline duration times the mode's factor.
    Scaled,
    /// Schedule-driven: distance over a fixed average speed.
    FixedSpeed { kmh: f64 },
}

/// How a mode's fare is charged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FareRule {
    /// No tariff is modelled; the estimate carries no fare.
    NotModelled,
    /// `ceil(km * rate)`, at least `minimum`.
    PerKm { rate: f64, minimum: u32 },
    /// `ceil(km * rate) + base`, at least `minimum`.
    BasePlusPerKm { base: u32, rate: f64, minimum: u32 },
}

impl FareRule {
    /// Fare in whole BDT for a distance, if this mode is priced.
    pub fn fare(&self, distance_km: f64) -> Option<u32> {
        match *self {
            FareRule::NotModelled => None,
            FareRule::PerKm { rate, minimum } => {
                let fare = (distance_km * rate).ceil() as u32;
                Some(fare.max(minimum))
            }
            FareRule::BasePlusPerKm {
                base,
                rate,
                minimum,
            } => {
                let fare = ((distance_km * rate).ceil() as u32).saturating_add(base);
                Some(fare.max(minimum))
            }
        }
    }
}

/// Timing and fare rule for one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeRule {
    pub timing: TimingRule,
    pub fare: FareRule,
}

/// The rule table. Adding a mode means adding one arm here.
pub fn rule_for(mode: TransportMode) -> ModeRule {
    match mode {
        TransportMode::Bus => ModeRule {
            timing: TimingRule::Scaled,
            fare: FareRule::PerKm {
                rate: BUS_RATE_PER_KM,
                minimum: BUS_MIN_FARE,
            },
        },
        TransportMode::Metro => ModeRule {
            timing: TimingRule::FixedSpeed {
                kmh: METRO_AVG_SPEED_KMH,
            },
            fare: FareRule::BasePlusPerKm {
                base: METRO_BASE_FARE,
                rate: METRO_RATE_PER_KM,
                minimum: METRO_BASE_FARE,
            },
        },
        TransportMode::Car | TransportMode::Rickshaw | TransportMode::Walking => ModeRule {
            timing: TimingRule::Scaled,
            fare: FareRule::NotModelled,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_factors() {
        let f = ModeFactors::default();
        assert_eq!(f.factor(TransportMode::Bus), 1.5);
        assert_eq!(f.factor(TransportMode::Car), 1.0);
        assert_eq!(f.factor(TransportMode::Metro), 1.0);
        assert_eq!(f.factor(TransportMode::Rickshaw), 1.2);
        assert_eq!(f.factor(TransportMode::Walking), 1.0);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn with_factor_overrides_one_mode() {
        let f = ModeFactors::default().with_factor(TransportMode::Rickshaw, 1.4);
        assert_eq!(f.rickshaw, 1.4);
        assert_eq!(f.bus, 1.5);
    }

    #[test]
    fn validate_rejects_non_positive() {
        let f = ModeFactors::default().with_factor(TransportMode::Walking, 0.0);
        assert_eq!(
            f.validate(),
            Err(EstimateError::InvalidFactor {
                mode: TransportMode::Walking,
                value: 0.0
            })
        );

        let f = ModeFactors::default().with_factor(TransportMode::Car, f64::NAN);
        assert!(f.validate().is_err());
    }

    #[test]
    fn partial_factors_fill_defaults() {
        let f: ModeFactors = serde_json::from_str(r#"{"bus": 1.8}"#).unwrap();
        assert_eq!(f.bus, 1.8);
        assert_eq!(f.rickshaw, 1.2);
    }

    #[test]
    fn bus_fare_rule() {
        let rule = rule_for(TransportMode::Bus).fare;
        assert_eq!(rule.fare(0.0), Some(10));
        assert_eq!(rule.fare(2.0), Some(10)); // 4.84 -> 5, floored to 10
        assert_eq!(rule.fare(10.0), Some(25)); // 24.2 -> 25
    }

    #[test]
    fn metro_fare_rule() {
        let rule = rule_for(TransportMode::Metro).fare;
        assert_eq!(rule.fare(0.0), Some(20));
        assert_eq!(rule.fare(1.1), Some(26)); // 5.5 -> 6, + 20
        assert_eq!(rule.fare(10.0), Some(70));
    }

    #[test]
    fn unpriced_modes() {
        for mode in [
            TransportMode::Car,
            TransportMode::Rickshaw,
            TransportMode::Walking,
        ] {
            assert_eq!(rule_for(mode).fare.fare(12.0), None);
            assert_eq!(rule_for(mode).timing, TimingRule::Scaled);
        }
    }
}
