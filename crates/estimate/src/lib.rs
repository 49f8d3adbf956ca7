//! # wayfarer-estimate
//!
//! Comparative travel-time estimates derived from a single driving route.
//!
//! Given the distance and duration of a route already computed by a routing
//! service, the estimator projects how long the same trip would take by car,
//! transit, bike and on foot, using distance-tiered heuristics and a
//! peak-hour traffic adjustment.
//!
//! ## Features
//!
//! - **Pure**: no I/O, no shared state; the only input besides the route is
//!   the local wall-clock time
//! - **Fixed order**: always four estimates (car, transit, bike, walk) or none
//! - **Configurable**: every coefficient lives in [`EstimatorConfig`]
//!   (serde-loadable with the `serde` feature)
//!
//! ## Example
//!
//! ```
//! use wayfarer_estimate::prelude::*;
//! use chrono::NaiveDate;
//!
//! // Wednesday, 10:00 local time: off-peak
//! let at = NaiveDate::from_ymd_opt(2024, 5, 8)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//!
//! let estimates = estimate_modes(1.0, 5.0, Some(at));
//! assert_eq!(estimates.len(), 4);
//! assert_eq!(estimates[0].mode, TravelMode::Car);
//! assert_eq!(estimates[2].display_duration(), "7 min");
//!
//! // Nothing to show for a degenerate route
//! assert!(estimate_modes(0.0, 5.0, Some(at)).is_empty());
//! ```

pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod estimator;
pub mod format;
mod heuristics;
pub mod mode;
pub mod route;

// Re-exports for convenience
pub mod prelude {
    pub use crate::calendar::{HourWindow, PeakSchedule, WeekdayFlags};
    pub use crate::clock::{Clock, FixedClock, LocalClock};
    pub use crate::config::{EstimatorConfig, SpeedTier, TransitTier};
    pub use crate::error::{ConfigError, EstimateError};
    pub use crate::estimator::{estimate_modes, Estimator};
    pub use crate::format::format_duration;
    pub use crate::mode::{ModeEstimate, TravelMode};
    pub use crate::route::RouteEstimate;
}

pub use prelude::*;
