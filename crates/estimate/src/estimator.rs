//! The travel-mode estimator.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::clock::{Clock, LocalClock};
use crate::config::EstimatorConfig;
use crate::error::{ConfigError, Result};
use crate::heuristics::{bike_minutes, drive_minutes, transit_minutes, walk_minutes};
use crate::mode::{ModeEstimate, TravelMode};
use crate::route::RouteEstimate;

/// Derives car, transit, bike and walk estimates from a driving route
///
/// Holds no mutable state; share one instance freely across threads.
pub struct Estimator<C: Clock = LocalClock> {
    config: EstimatorConfig,
    clock: C,
}

impl Default for Estimator<LocalClock> {
    fn default() -> Self {
        Self {
            config: EstimatorConfig::default(),
            clock: LocalClock,
        }
    }
}

impl Estimator<LocalClock> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom coefficients; rejected if they fail validation
    pub fn with_config(config: EstimatorConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            clock: LocalClock,
        })
    }
}

impl<C: Clock> Estimator<C> {
    /// Read "now" from a different clock
    pub fn with_clock<D: Clock>(self, clock: D) -> Estimator<D> {
        Estimator {
            config: self.config,
            clock,
        }
    }

    /// Current local wall-clock time, as seen by this estimator
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Whether `at` falls in a peak window
    pub fn is_peak(&self, at: &NaiveDateTime) -> bool {
        self.config.peak.is_peak(at)
    }

    /// All four estimates, or the reason the route is unusable
    pub fn try_estimate(&self, route: &RouteEstimate) -> Result<[ModeEstimate; 4]> {
        route.validate()?;

        let at = route.time_of_day.unwrap_or_else(|| self.clock.now());
        let peak = self.is_peak(&at);
        debug!(
            distance_km = route.distance_km,
            drive_duration_min = route.drive_duration_min,
            %at,
            peak,
            "estimating travel modes"
        );

        let (km, drive) = (route.distance_km, route.drive_duration_min);
        Ok(TravelMode::ALL.map(|mode| {
            let minutes = match mode {
                TravelMode::Car => drive_minutes(&self.config.drive, km, drive, peak),
                TravelMode::Transit => transit_minutes(&self.config.transit, km, drive, peak),
                TravelMode::Bike => bike_minutes(&self.config.bike, km, peak),
                TravelMode::Walk => walk_minutes(&self.config.walk, km),
            };
            ModeEstimate::new(mode, minutes)
        }))
    }

    /// All four estimates in display order, or none for a degenerate route
    pub fn estimate(&self, route: &RouteEstimate) -> Vec<ModeEstimate> {
        match self.try_estimate(route) {
            Ok(estimates) => estimates.into(),
            Err(error) => {
                debug!("no estimates: {error}");
                Vec::new()
            }
        }
    }
}

/// Estimate with the default coefficients and the local clock
///
/// Returns four estimates (car, transit, bike, walk) or an empty `Vec` when
/// distance or duration is non-positive or not finite.
pub fn estimate_modes(
    distance_km: f64,
    drive_duration_min: f64,
    time_of_day: Option<NaiveDateTime>,
) -> Vec<ModeEstimate> {
    let route = RouteEstimate {
        distance_km,
        drive_duration_min,
        time_of_day,
    };
    Estimator::default().estimate(&route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::EstimateError;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    // 2024-05-06 is a Monday
    fn monday(hour: u32, minute: u32) -> NaiveDateTime {
        at(2024, 5, 6, hour, minute)
    }

    fn wednesday(hour: u32, minute: u32) -> NaiveDateTime {
        at(2024, 5, 8, hour, minute)
    }

    fn durations(estimates: &[ModeEstimate]) -> Vec<f64> {
        estimates.iter().map(|e| e.duration_min).collect()
    }

    #[test]
    fn test_short_off_peak_scenario() {
        let estimates = estimate_modes(1.0, 5.0, Some(wednesday(10, 0)));
        assert_eq!(estimates.len(), 4);

        assert_relative_eq!(estimates[0].duration_min, 5.5, epsilon = 1e-9);
        assert_relative_eq!(estimates[1].duration_min, 12.5, epsilon = 1e-9);
        assert_relative_eq!(estimates[2].duration_min, 7.0, epsilon = 1e-9);
        assert_relative_eq!(estimates[3].duration_min, 15.333333333, epsilon = 1e-6);
    }

    #[test]
    fn test_medium_peak_scenario() {
        let estimates = estimate_modes(10.0, 20.0, Some(monday(8, 0)));
        assert_eq!(estimates.len(), 4);

        assert_relative_eq!(estimates[0].duration_min, 31.0, epsilon = 1e-9);
        assert_relative_eq!(estimates[1].duration_min, 44.65, epsilon = 1e-9);
        // 10 km at 18 km/h + 2, no peak penalty at 10 km
        assert_relative_eq!(estimates[2].duration_min, 10.0 / 18.0 * 60.0 + 2.0, epsilon = 1e-9);
        // 10 km at 4.8 km/h + 40 crossings
        assert_relative_eq!(estimates[3].duration_min, 125.0 + 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_order_and_positive() {
        let distances = [0.01, 0.3, 1.0, 1.5, 2.0, 4.0, 7.5, 12.0, 15.0, 80.0];
        for km in distances {
            for time in [wednesday(10, 0), monday(8, 0), at(2024, 5, 11, 18, 0)] {
                let estimates = estimate_modes(km, km * 2.5, Some(time));
                let modes: Vec<_> = estimates.iter().map(|e| e.mode).collect();
                assert_eq!(modes, TravelMode::ALL.to_vec());
                for estimate in &estimates {
                    assert!(estimate.duration_min.is_finite());
                    assert!(estimate.duration_min > 0.0, "{estimate:?} at {km} km");
                }
            }
        }
    }

    #[test]
    fn test_degenerate_input_yields_nothing() {
        let time = Some(wednesday(10, 0));
        assert!(estimate_modes(0.0, 5.0, time).is_empty());
        assert!(estimate_modes(1.0, 0.0, time).is_empty());
        assert!(estimate_modes(-1.0, 5.0, time).is_empty());
        assert!(estimate_modes(1.0, -5.0, time).is_empty());
        assert!(estimate_modes(f64::NAN, 5.0, time).is_empty());
        assert!(estimate_modes(1.0, f64::NAN, time).is_empty());
        assert!(estimate_modes(f64::INFINITY, 5.0, time).is_empty());
    }

    #[test]
    fn test_try_estimate_reports_reason() {
        let estimator = Estimator::new();
        assert_eq!(
            estimator.try_estimate(&RouteEstimate::new(0.0, 5.0)).unwrap_err(),
            EstimateError::InvalidDistance(0.0)
        );
        assert_eq!(
            estimator.try_estimate(&RouteEstimate::new(1.0, 0.0)).unwrap_err(),
            EstimateError::InvalidDuration(0.0)
        );
    }

    #[test]
    fn test_deterministic() {
        let time = Some(monday(17, 45));
        let first = estimate_modes(6.3, 14.2, time);
        let second = estimate_modes(6.3, 14.2, time);

        let first_bits: Vec<u64> = durations(&first).iter().map(|d| d.to_bits()).collect();
        let second_bits: Vec<u64> = durations(&second).iter().map(|d| d.to_bits()).collect();
        assert_eq!(first_bits, second_bits);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_time_reads_clock() {
        let pinned = Estimator::new().with_clock(FixedClock(monday(8, 0)));
        let implicit = pinned.estimate(&RouteEstimate::new(10.0, 20.0));
        let explicit = pinned.estimate(&RouteEstimate::new(10.0, 20.0).at(monday(8, 0)));
        assert_eq!(implicit, explicit);

        // Explicit time wins over the clock
        let off_peak = pinned.estimate(&RouteEstimate::new(10.0, 20.0).at(wednesday(10, 0)));
        assert_relative_eq!(off_peak[0].duration_min, 27.0, epsilon = 1e-9);
    }

    #[test]
    fn test_weekend_ignores_rush_hour() {
        let saturday = at(2024, 5, 11, 8, 0);
        let weekend = estimate_modes(10.0, 20.0, Some(saturday));
        let off_peak = estimate_modes(10.0, 20.0, Some(wednesday(10, 0)));
        assert_eq!(weekend, off_peak);
    }

    #[test]
    fn test_empty_tier_tables_never_reach_heuristics() {
        let empties: [fn(&mut EstimatorConfig); 3] = [
            |c| c.transit.tiers.clear(),
            |c| c.bike.tiers.clear(),
            |c| c.walk.tiers.clear(),
        ];
        for empty in empties {
            let mut config = EstimatorConfig::default();
            empty(&mut config);
            assert!(matches!(
                Estimator::with_config(config),
                Err(ConfigError::EmptyTiers(_))
            ));
        }
    }

    #[test]
    fn test_custom_config() {
        let mut config = EstimatorConfig::default();
        config.drive.parking_allowance_min = 0.0;
        let estimator = Estimator::with_config(config)
            .unwrap()
            .with_clock(FixedClock(wednesday(10, 0)));

        let estimates = estimator.estimate(&RouteEstimate::new(10.0, 20.0));
        assert_relative_eq!(estimates[0].duration_min, 22.0, epsilon = 1e-9);

        let mut invalid = EstimatorConfig::default();
        invalid.walk.tiers.clear();
        assert!(Estimator::with_config(invalid).is_err());
    }
}
