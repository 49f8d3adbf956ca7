//! Peak-hour calendar.
//!
//! A moment is "peak" when it falls on one of the schedule's weekdays and its
//! wall-clock hour lies inside one of the inclusive hour windows. Windows
//! match on the hour only, so 09:59 is still inside a `7..=9` window.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::error::ConfigError;

/// Compact representation of the weekdays a schedule applies to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Weekday>", into = "Vec<Weekday>")
)]
pub struct WeekdayFlags {
    pub(crate) flags: u8,
}

impl WeekdayFlags {
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    /// Monday through Friday
    pub fn working_week() -> Self {
        Self::from_bools(true, true, true, true, true, false, false)
    }

    pub fn set(&mut self, weekday: Weekday) {
        self.flags |= 1 << weekday.number_from_monday();
    }

    pub fn unset(&mut self, weekday: Weekday) {
        self.flags &= !(1 << weekday.number_from_monday());
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        (self.flags & (1 << weekday.number_from_monday())) != 0
    }

    pub fn from_bools(mon: bool, tue: bool, wed: bool, thu: bool, fri: bool, sat: bool, sun: bool) -> Self {
        let mut flags = Self::new();
        if mon { flags.set(Weekday::Mon); }
        if tue { flags.set(Weekday::Tue); }
        if wed { flags.set(Weekday::Wed); }
        if thu { flags.set(Weekday::Thu); }
        if fri { flags.set(Weekday::Fri); }
        if sat { flags.set(Weekday::Sat); }
        if sun { flags.set(Weekday::Sun); }
        flags
    }

    /// Weekdays in the set, Monday first
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .filter(|day| self.contains(*day))
    }
}

impl From<Vec<Weekday>> for WeekdayFlags {
    fn from(days: Vec<Weekday>) -> Self {
        let mut flags = Self::new();
        for day in days {
            flags.set(day);
        }
        flags
    }
}

impl From<WeekdayFlags> for Vec<Weekday> {
    fn from(flags: WeekdayFlags) -> Self {
        flags.iter().collect()
    }
}

/// Inclusive range of wall-clock hours (`start..=end`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
}

impl HourWindow {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, hour: u32) -> bool {
        (self.start..=self.end).contains(&hour)
    }
}

/// When congestion-sensitive adjustments apply
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakSchedule {
    pub weekdays: WeekdayFlags,
    pub windows: Vec<HourWindow>,
}

impl Default for PeakSchedule {
    /// Weekday rush hours: 07:00–09:59 and 17:00–19:59
    fn default() -> Self {
        Self {
            weekdays: WeekdayFlags::working_week(),
            windows: vec![HourWindow::new(7, 9), HourWindow::new(17, 19)],
        }
    }
}

impl PeakSchedule {
    /// Check if a local wall-clock moment falls in a peak window
    pub fn is_peak(&self, at: &NaiveDateTime) -> bool {
        if !self.weekdays.contains(at.weekday()) {
            return false;
        }

        let hour = at.hour();
        self.windows.iter().any(|window| window.contains(hour))
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for window in &self.windows {
            if window.start > window.end || window.end > 23 {
                return Err(ConfigError::InvalidHourWindow {
                    start: window.start,
                    end: window.end,
                });
            }
        }
        Ok(())
    }
}
