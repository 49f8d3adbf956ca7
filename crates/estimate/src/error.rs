//! Error types.
//!
//! Estimation has a single failure class, a degenerate route. The public
//! [`estimate_modes`](crate::estimator::estimate_modes) entry point turns it
//! into an empty result; [`Estimator::try_estimate`](crate::estimator::Estimator::try_estimate)
//! surfaces it for callers that want the reason.

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("Invalid distance: {0} km (must be positive and finite)")]
    InvalidDistance(f64),

    #[error("Invalid drive duration: {0} min (must be positive and finite)")]
    InvalidDuration(f64),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Tier table `{0}` is empty")]
    EmptyTiers(&'static str),

    #[error("Tier table `{table}` is not sorted by lower bound at index {index}")]
    UnsortedTiers { table: &'static str, index: usize },

    #[error("Tier table `{table}` must start at 0 km, starts at {from_km} km")]
    TiersStartAboveZero { table: &'static str, from_km: f64 },

    #[error("Non-positive speed {speed_kmh} km/h in tier table `{table}`")]
    NonPositiveSpeed { table: &'static str, speed_kmh: f64 },

    #[error("Invalid coefficient `{name}`: {value}")]
    InvalidCoefficient { name: &'static str, value: f64 },

    #[error("Invalid peak window {start}..={end} (hours must be 0..=23, start <= end)")]
    InvalidHourWindow { start: u32, end: u32 },
}

pub type Result<T> = std::result::Result<T, EstimateError>;
