//! Travel modes and per-mode estimates.

use crate::format::format_duration;

/// A way of making the trip
///
/// Declaration order is the display order of an estimate set.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[repr(u8)]
pub enum TravelMode {
    Car = 0,
    Transit = 1,
    Bike = 2,
    Walk = 3,
}

impl TravelMode {
    /// Every mode, in display order
    pub const ALL: [TravelMode; 4] = [Self::Car, Self::Transit, Self::Bike, Self::Walk];

    /// Stable identifier (`car`, `transit`, `bike`, `walk`)
    pub fn id(&self) -> &'static str {
        self.into()
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Car => "Drive",
            Self::Transit => "Transit",
            Self::Bike => "Bike",
            Self::Walk => "Walk",
        }
    }

    /// Icon name for the presentation layer
    pub fn icon_hint(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Transit => "bus",
            Self::Bike => "bicycle",
            Self::Walk => "walk",
        }
    }

    /// Chip color (hex RGB, e.g. "#4A90E2")
    pub fn color_hint(&self) -> &'static str {
        match self {
            Self::Car => "#4A90E2",
            Self::Transit => "#9B59B6",
            Self::Bike => "#27AE60",
            Self::Walk => "#F39C12",
        }
    }
}

/// Projected duration of the trip for one mode
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeEstimate {
    pub mode: TravelMode,
    pub label: String,
    /// Full precision; round only for display
    pub duration_min: f64,
    pub icon_hint: String,
    pub color_hint: String,
}

impl ModeEstimate {
    pub fn new(mode: TravelMode, duration_min: f64) -> Self {
        Self {
            mode,
            label: mode.label().to_owned(),
            duration_min,
            icon_hint: mode.icon_hint().to_owned(),
            color_hint: mode.color_hint().to_owned(),
        }
    }

    pub fn mode_id(&self) -> &'static str {
        self.mode.id()
    }

    /// Duration formatted for a chip ("< 1 min", "12 min", "1 h 5 min")
    pub fn display_duration(&self) -> String {
        format_duration(self.duration_min)
    }
}
