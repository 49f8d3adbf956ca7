//! Estimator coefficients.
//!
//! [`EstimatorConfig::default`] is the canonical coefficient set. The values
//! are a behavioural contract: estimates produced with the defaults must stay
//! bit-for-bit stable, so change them only through an override config.
//!
//! Tier tables are keyed by their inclusive lower bound in kilometres. A
//! distance uses the last tier whose `from_km` is `<=` the distance; the first
//! tier must start at 0.

use crate::calendar::PeakSchedule;
use crate::error::ConfigError;

/// Distance tier with an average speed
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedTier {
    pub from_km: f64,
    pub speed_kmh: f64,
}

impl SpeedTier {
    pub const fn new(from_km: f64, speed_kmh: f64) -> Self {
        Self { from_km, speed_kmh }
    }
}

/// Distance tier for transit: `drive_min * factor + offset_min`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitTier {
    pub from_km: f64,
    pub factor: f64,
    pub offset_min: f64,
}

impl TransitTier {
    pub const fn new(from_km: f64, factor: f64, offset_min: f64) -> Self {
        Self {
            from_km,
            factor,
            offset_min,
        }
    }
}

pub(crate) trait Tier {
    fn from_km(&self) -> f64;
}

impl Tier for SpeedTier {
    fn from_km(&self) -> f64 {
        self.from_km
    }
}

impl Tier for TransitTier {
    fn from_km(&self) -> f64 {
        self.from_km
    }
}

/// Pick the tier covering `distance_km`
///
/// Tables are validated non-empty before an estimator accepts them.
pub(crate) fn tier_for<T: Tier>(tiers: &[T], distance_km: f64) -> &T {
    tiers
        .iter()
        .take_while(|tier| tier.from_km() <= distance_km)
        .last()
        .unwrap_or(&tiers[0])
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct DriveConfig {
    /// Congestion multiplier during peak hours
    pub peak_factor: f64,
    /// Baseline buffer outside peak hours
    pub off_peak_factor: f64,
    /// Parking is added only strictly above this distance
    pub parking_threshold_km: f64,
    pub parking_allowance_min: f64,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            peak_factor: 1.3,
            off_peak_factor: 1.1,
            parking_threshold_km: 2.0,
            parking_allowance_min: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct TransitConfig {
    pub tiers: Vec<TransitTier>,
    /// Applied after the tier formula; more frequent service at rush hour
    pub peak_factor: f64,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                // Too short for transit: dominated by walking to and from stops
                TransitTier::new(0.0, 2.5, 0.0),
                TransitTier::new(1.5, 1.8, 12.0),
                TransitTier::new(5.0, 1.6, 15.0),
                // Express routes on long hauls
                TransitTier::new(15.0, 1.4, 18.0),
            ],
            peak_factor: 0.95,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct BikeConfig {
    pub tiers: Vec<SpeedTier>,
    /// Locking and parking
    pub overhead_min: f64,
    /// Stop-and-go at intersections during peak hours
    pub peak_factor: f64,
    /// Peak adjustment applies only strictly below this distance
    pub peak_max_km: f64,
}

impl Default for BikeConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                SpeedTier::new(0.0, 12.0),
                SpeedTier::new(2.0, 16.0),
                SpeedTier::new(8.0, 18.0),
                // Fatigue on long rides
                SpeedTier::new(15.0, 17.0),
            ],
            overhead_min: 2.0,
            peak_factor: 1.1,
            peak_max_km: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct WalkConfig {
    pub tiers: Vec<SpeedTier>,
    pub crossings_per_km: f64,
    pub crossing_penalty_min: f64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                SpeedTier::new(0.0, 4.0),
                SpeedTier::new(0.5, 4.5),
                SpeedTier::new(2.0, 5.0),
                // Fatigue on long walks
                SpeedTier::new(5.0, 4.8),
            ],
            crossings_per_km: 4.0,
            crossing_penalty_min: 0.5,
        }
    }
}

/// Every coefficient the estimator uses
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct EstimatorConfig {
    pub peak: PeakSchedule,
    pub drive: DriveConfig,
    pub transit: TransitConfig,
    pub bike: BikeConfig,
    pub walk: WalkConfig,
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.peak.validate()?;

        positive("drive.peak_factor", self.drive.peak_factor)?;
        positive("drive.off_peak_factor", self.drive.off_peak_factor)?;
        non_negative("drive.parking_threshold_km", self.drive.parking_threshold_km)?;
        non_negative("drive.parking_allowance_min", self.drive.parking_allowance_min)?;

        positive("transit.peak_factor", self.transit.peak_factor)?;
        validate_tiers("transit.tiers", &self.transit.tiers)?;
        for tier in &self.transit.tiers {
            positive("transit.tiers.factor", tier.factor)?;
            non_negative("transit.tiers.offset_min", tier.offset_min)?;
        }

        non_negative("bike.overhead_min", self.bike.overhead_min)?;
        positive("bike.peak_factor", self.bike.peak_factor)?;
        non_negative("bike.peak_max_km", self.bike.peak_max_km)?;
        validate_speed_tiers("bike.tiers", &self.bike.tiers)?;

        non_negative("walk.crossings_per_km", self.walk.crossings_per_km)?;
        non_negative("walk.crossing_penalty_min", self.walk.crossing_penalty_min)?;
        validate_speed_tiers("walk.tiers", &self.walk.tiers)?;

        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCoefficient { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCoefficient { name, value })
    }
}

fn validate_tiers<T: Tier>(table: &'static str, tiers: &[T]) -> Result<(), ConfigError> {
    let first = tiers.first().ok_or(ConfigError::EmptyTiers(table))?;
    if first.from_km() != 0.0 {
        return Err(ConfigError::TiersStartAboveZero {
            table,
            from_km: first.from_km(),
        });
    }

    for (index, pair) in tiers.windows(2).enumerate() {
        let (lower, upper) = (pair[0].from_km(), pair[1].from_km());
        if !upper.is_finite() || upper <= lower {
            return Err(ConfigError::UnsortedTiers {
                table,
                index: index + 1,
            });
        }
    }
    Ok(())
}

fn validate_speed_tiers(table: &'static str, tiers: &[SpeedTier]) -> Result<(), ConfigError> {
    validate_tiers(table, tiers)?;
    for tier in tiers {
        if !tier.speed_kmh.is_finite() || tier.speed_kmh <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed {
                table,
                speed_kmh: tier.speed_kmh,
            });
        }
    }
    Ok(())
}
