//! Driving route input.

use chrono::NaiveDateTime;

use crate::error::{EstimateError, Result};

/// An already-computed driving route, as returned by a routing service
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteEstimate {
    pub distance_km: f64,
    pub drive_duration_min: f64,
    /// Local wall-clock departure time; `None` means now
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_of_day: Option<NaiveDateTime>,
}

impl RouteEstimate {
    pub fn new(distance_km: f64, drive_duration_min: f64) -> Self {
        Self {
            distance_km,
            drive_duration_min,
            time_of_day: None,
        }
    }

    pub fn at(mut self, time_of_day: NaiveDateTime) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    /// Build from possibly-absent values reported by a routing client
    pub fn from_parts(
        distance_km: Option<f64>,
        drive_duration_min: Option<f64>,
        time_of_day: Option<NaiveDateTime>,
    ) -> Result<Self> {
        let distance_km = distance_km.ok_or(EstimateError::InvalidDistance(f64::NAN))?;
        let drive_duration_min =
            drive_duration_min.ok_or(EstimateError::InvalidDuration(f64::NAN))?;

        let route = Self {
            distance_km,
            drive_duration_min,
            time_of_day,
        };
        route.validate()?;
        Ok(route)
    }

    /// Both distance and duration must be positive and finite
    pub fn validate(&self) -> Result<()> {
        if !(self.distance_km.is_finite() && self.distance_km > 0.0) {
            return Err(EstimateError::InvalidDistance(self.distance_km));
        }
        if !(self.drive_duration_min.is_finite() && self.drive_duration_min > 0.0) {
            return Err(EstimateError::InvalidDuration(self.drive_duration_min));
        }
        Ok(())
    }
}
