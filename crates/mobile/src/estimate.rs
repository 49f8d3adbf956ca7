use chrono::{DateTime, Local, NaiveDateTime, Offset, TimeZone};
use palette::Srgb;
use wayfarer_estimate::{Estimator, ModeEstimate, RouteEstimate, TravelMode};

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum EstimateFailure {
    #[error("{0}")]
    InvalidRoute(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum ModeKind {
    Car,
    Transit,
    Bike,
    Walk,
}

impl From<TravelMode> for ModeKind {
    fn from(mode: TravelMode) -> Self {
        match mode {
            TravelMode::Car => Self::Car,
            TravelMode::Transit => Self::Transit,
            TravelMode::Bike => Self::Bike,
            TravelMode::Walk => Self::Walk,
        }
    }
}

/// One duration chip, ready to render
#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct ModeEstimateRecord {
    pub mode: ModeKind,
    pub mode_id: String,
    pub label: String,
    pub duration_min: f64,
    pub duration_text: String,
    pub icon_hint: String,
    pub color_hint: String,
    /// `color_hint` packed as 0xAARRGGBB (opaque); transparent if unparseable
    pub color_argb: u32,
}

impl From<ModeEstimate> for ModeEstimateRecord {
    fn from(estimate: ModeEstimate) -> Self {
        let color_argb = parse_argb(&estimate.color_hint).unwrap_or_else(|| {
            tracing::warn!("unparseable color hint {:?}", estimate.color_hint);
            0
        });

        Self {
            mode: estimate.mode.into(),
            mode_id: estimate.mode_id().to_owned(),
            duration_text: estimate.display_duration(),
            label: estimate.label,
            duration_min: estimate.duration_min,
            icon_hint: estimate.icon_hint,
            color_hint: estimate.color_hint,
            color_argb,
        }
    }
}

/// Parse "#RRGGBB" into an opaque ARGB word
pub(crate) fn parse_argb(hex: &str) -> Option<u32> {
    let rgb: Srgb<u8> = hex.parse().ok()?;
    Some(u32::from_be_bytes([0xFF, rgb.red, rgb.green, rgb.blue]))
}

/// Epoch milliseconds to local wall-clock time
///
/// Timestamps chrono cannot represent are treated as absent.
pub(crate) fn local_time(epoch_ms: Option<i64>) -> Option<NaiveDateTime> {
    wall_clock_in(&Local, epoch_ms)
}

/// Epoch milliseconds to wall-clock time in `tz`; `None` if out of range
pub(crate) fn wall_clock_in<Tz: TimeZone>(tz: &Tz, epoch_ms: Option<i64>) -> Option<NaiveDateTime> {
    let utc = DateTime::from_timestamp_millis(epoch_ms?)?.naive_utc();
    let offset = tz.offset_from_utc_datetime(&utc).fix();
    utc.checked_add_offset(offset)
}

/// Four estimates (car, transit, bike, walk), or none for an unusable route
///
/// `time_of_day_epoch_ms` defaults to now.
#[uniffi::export]
pub fn estimate_modes(
    distance_km: Option<f64>,
    drive_duration_min: Option<f64>,
    time_of_day_epoch_ms: Option<i64>,
) -> Vec<ModeEstimateRecord> {
    try_estimate_modes(distance_km, drive_duration_min, time_of_day_epoch_ms).unwrap_or_default()
}

/// Like [`estimate_modes`] but reports why a route was rejected
#[uniffi::export]
pub fn try_estimate_modes(
    distance_km: Option<f64>,
    drive_duration_min: Option<f64>,
    time_of_day_epoch_ms: Option<i64>,
) -> Result<Vec<ModeEstimateRecord>, EstimateFailure> {
    let route = RouteEstimate::from_parts(
        distance_km,
        drive_duration_min,
        local_time(time_of_day_epoch_ms),
    )
    .map_err(|e| EstimateFailure::InvalidRoute(e.to_string()))?;

    let estimates = Estimator::default()
        .try_estimate(&route)
        .map_err(|e| EstimateFailure::InvalidRoute(e.to_string()))?;

    Ok(estimates.into_iter().map(ModeEstimateRecord::from).collect())
}

#[uniffi::export]
pub fn format_duration(minutes: f64) -> String {
    wayfarer_estimate::format_duration(minutes)
}

/// Whether the given moment (default now) is a weekday rush hour
#[uniffi::export]
pub fn is_peak_hour(epoch_ms: Option<i64>) -> bool {
    let at = local_time(epoch_ms).unwrap_or_else(|| Local::now().naive_local());
    Estimator::default().is_peak(&at)
}
