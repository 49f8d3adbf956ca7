//! Display formatting for durations.

/// Format a duration in minutes for display
///
/// - under one minute: `"< 1 min"`
/// - under an hour (after rounding): `"N min"`
/// - otherwise `"H h M min"`, or `"H h"` on the hour
///
/// The hour threshold applies after rounding to whole minutes, so 59.6 min
/// reads as `"1 h"` rather than `"60 min"`. The `< 1 min` check applies
/// before rounding.
pub fn format_duration(minutes: f64) -> String {
    if !minutes.is_finite() || minutes < 1.0 {
        return "< 1 min".to_owned();
    }

    let total = minutes.round() as u64;
    if total < 60 {
        return format!("{total} min");
    }

    let (hours, rest) = (total / 60, total % 60);
    if rest == 0 {
        format!("{hours} h")
    } else {
        format!("{hours} h {rest} min")
    }
}
