//! Pluggable wall-clock source.
//!
//! Routes without an explicit time of day are estimated at "now". The
//! estimator reads "now" through this trait so callers (and tests) can pin it.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

/// Current local wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The device's local clock and timezone
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same moment
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

impl<T: Clock + ?Sized> Clock for Box<T> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
