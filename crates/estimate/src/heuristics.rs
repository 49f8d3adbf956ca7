//! Per-mode duration heuristics.
//!
//! Each function takes a validated route, a validated config and the peak
//! flag, and returns minutes at full precision. Only [`Estimator`] calls
//! them, after [`EstimatorConfig::validate`] has guaranteed non-empty tier
//! tables. Multipliers compound in the order they are applied below;
//! reordering them changes results in the last bits.
//!
//! [`Estimator`]: crate::estimator::Estimator
//! [`EstimatorConfig::validate`]: crate::config::EstimatorConfig::validate
//!
//! ## Tier discontinuities
//!
//! Durations are monotone in distance only *within* a tier. With the default
//! coefficients the estimate jumps at these boundaries:
//!
//! - **Drive**: +5 min parking once distance exceeds 2 km.
//! - **Transit**: at 1.5 km the formula switches from `d*2.5` to `d*1.8+12`,
//!   which can move either way depending on drive time; similar switches at
//!   5 km and 15 km.
//! - **Bike**: faster tiers at 2 km and 8 km shorten the estimate; the slower
//!   tier at 15 km lengthens it; the peak penalty stops applying at 10 km.
//! - **Walk**: faster tiers at 0.5 km and 2 km shorten the estimate; the
//!   slower tier at 5 km lengthens it. The crossing penalty steps every
//!   quarter kilometre.

use crate::config::{tier_for, BikeConfig, DriveConfig, TransitConfig, WalkConfig};

pub(crate) fn drive_minutes(config: &DriveConfig, distance_km: f64, drive_min: f64, peak: bool) -> f64 {
    let factor = if peak {
        config.peak_factor
    } else {
        config.off_peak_factor
    };

    let mut minutes = drive_min * factor;
    if distance_km > config.parking_threshold_km {
        minutes += config.parking_allowance_min;
    }
    minutes
}

/// Walk to the stop, wait, ride: a multiplier plus offset on drive time
pub(crate) fn transit_minutes(config: &TransitConfig, distance_km: f64, drive_min: f64, peak: bool) -> f64 {
    let tier = tier_for(&config.tiers, distance_km);

    let mut minutes = drive_min * tier.factor + tier.offset_min;
    if peak {
        minutes *= config.peak_factor;
    }
    minutes
}

pub(crate) fn bike_minutes(config: &BikeConfig, distance_km: f64, peak: bool) -> f64 {
    let tier = tier_for(&config.tiers, distance_km);

    let mut minutes = distance_km / tier.speed_kmh * 60.0 + config.overhead_min;
    if peak && distance_km < config.peak_max_km {
        minutes *= config.peak_factor;
    }
    minutes
}

pub(crate) fn walk_minutes(config: &WalkConfig, distance_km: f64) -> f64 {
    let tier = tier_for(&config.tiers, distance_km);

    let crossings = (distance_km * config.crossings_per_km).floor();
    distance_km / tier.speed_kmh * 60.0 + crossings * config.crossing_penalty_min
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_drive() {
        let config = DriveConfig::default();

        assert_relative_eq!(drive_minutes(&config, 1.0, 5.0, false), 5.5, epsilon = 1e-9);
        assert_relative_eq!(drive_minutes(&config, 10.0, 20.0, true), 31.0, epsilon = 1e-9);

        // Parking allowance only strictly above 2 km
        assert_relative_eq!(drive_minutes(&config, 2.0, 10.0, false), 11.0, epsilon = 1e-9);
        assert_relative_eq!(drive_minutes(&config, 2.01, 10.0, false), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_transit_tiers() {
        let config = TransitConfig::default();

        assert_relative_eq!(transit_minutes(&config, 1.0, 5.0, false), 12.5, epsilon = 1e-9);
        assert_relative_eq!(transit_minutes(&config, 1.5, 5.0, false), 21.0, epsilon = 1e-9);
        assert_relative_eq!(transit_minutes(&config, 4.9, 10.0, false), 30.0, epsilon = 1e-9);
        assert_relative_eq!(transit_minutes(&config, 5.0, 10.0, false), 31.0, epsilon = 1e-9);
        assert_relative_eq!(transit_minutes(&config, 15.0, 20.0, false), 46.0, epsilon = 1e-9);
        assert_relative_eq!(transit_minutes(&config, 10.0, 20.0, true), 44.65, epsilon = 1e-9);
    }

    #[test]
    fn test_bike_tiers_and_peak() {
        let config = BikeConfig::default();

        assert_relative_eq!(bike_minutes(&config, 1.0, false), 7.0, epsilon = 1e-9);
        assert_relative_eq!(bike_minutes(&config, 4.0, false), 17.0, epsilon = 1e-9);
        assert_relative_eq!(bike_minutes(&config, 9.0, false), 32.0, epsilon = 1e-9);
        assert_relative_eq!(bike_minutes(&config, 17.0, false), 62.0, epsilon = 1e-9);

        // Peak stop-and-go only under 10 km
        assert_relative_eq!(bike_minutes(&config, 1.0, true), 7.7, epsilon = 1e-9);
        assert_relative_eq!(bike_minutes(&config, 9.0, true), 35.2, epsilon = 1e-9);
        assert_relative_eq!(
            bike_minutes(&config, 10.0, true),
            bike_minutes(&config, 10.0, false)
        );
    }

    #[test]
    fn test_walk_tiers_and_crossings() {
        let config = WalkConfig::default();

        // 0.2 km at 4 km/h = 3 min, no full crossing
        assert_relative_eq!(walk_minutes(&config, 0.2), 3.0, epsilon = 1e-9);
        // 0.25 km: one crossing
        assert_relative_eq!(walk_minutes(&config, 0.25), 4.25, epsilon = 1e-9);
        assert_relative_eq!(walk_minutes(&config, 1.0), 60.0 / 4.5 + 2.0, epsilon = 1e-9);
        assert_relative_eq!(walk_minutes(&config, 3.0), 36.0 + 6.0, epsilon = 1e-9);
        assert_relative_eq!(walk_minutes(&config, 6.0), 75.0 + 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_monotone_within_tiers() {
        let transit = TransitConfig::default();
        let bike = BikeConfig::default();
        let walk = WalkConfig::default();

        // Constant 30 km/h average driving speed
        let drive_min = |km: f64| km * 2.0;

        // (start, end) of each interior stretch that shares all tiers
        let stretches = [
            (0.05, 0.49),
            (0.5, 1.49),
            (1.5, 1.99),
            (2.0, 4.99),
            (5.0, 7.99),
            (8.0, 9.99),
            (10.0, 14.99),
            (15.0, 40.0),
        ];

        for peak in [false, true] {
            for (start, end) in stretches {
                let steps = 50;
                let mut previous: Option<(f64, f64, f64)> = None;
                for i in 0..=steps {
                    let km = start + (end - start) * i as f64 / steps as f64;
                    let current = (
                        transit_minutes(&transit, km, drive_min(km), peak),
                        bike_minutes(&bike, km, peak),
                        walk_minutes(&walk, km),
                    );
                    if let Some(prev) = previous {
                        assert!(current.0 >= prev.0, "transit decreased at {km} km");
                        assert!(current.1 >= prev.1, "bike decreased at {km} km");
                        assert!(current.2 >= prev.2, "walk decreased at {km} km");
                    }
                    previous = Some(current);
                }
            }
        }
    }

    #[test]
    fn test_documented_discontinuities() {
        let bike = BikeConfig::default();
        let walk = WalkConfig::default();

        // Faster bike tier at 2 km shortens the estimate
        assert!(bike_minutes(&bike, 2.0, false) < bike_minutes(&bike, 1.99, false));
        // Faster walk tier at 0.5 km shortens the estimate
        assert!(walk_minutes(&walk, 0.5) < walk_minutes(&walk, 0.49));
    }
}
