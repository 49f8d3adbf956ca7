use std::sync::Arc;

use tokio::sync::RwLock;
use wayfarer_estimate::{Clock, Estimator, LocalClock, RouteEstimate};

use crate::estimate::ModeEstimateRecord;

/// Bit-exact identity of a route, so NaN and -0.0 compare predictably
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RouteKey {
    distance_bits: u64,
    duration_bits: u64,
}

impl RouteKey {
    fn of(route: &RouteEstimate) -> Self {
        Self {
            distance_bits: route.distance_km.to_bits(),
            duration_bits: route.drive_duration_min.to_bits(),
        }
    }
}

struct Cached {
    key: RouteKey,
    peak: bool,
    estimates: Vec<ModeEstimateRecord>,
}

#[derive(Default)]
struct Inner {
    route: Option<RouteEstimate>,
    cached: Option<Cached>,
}

/// The driving route currently on screen, and its estimates
///
/// Estimates are recomputed only when the route changes or the current time
/// moves in or out of a peak window.
#[derive(uniffi::Object)]
pub struct RouteEstimatorState {
    estimator: Estimator<Arc<dyn Clock>>,
    inner: RwLock<Inner>,
}

impl RouteEstimatorState {
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            estimator: Estimator::new().with_clock(clock),
            inner: RwLock::new(Inner::default()),
        }
    }
}

#[uniffi::export]
impl RouteEstimatorState {
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(LocalClock))
    }

    /// Store a new driving route; returns whether it differs from the last one
    ///
    /// An absent or degenerate route clears the state.
    pub async fn update_route(
        &self,
        distance_km: Option<f64>,
        drive_duration_min: Option<f64>,
    ) -> bool {
        let route = RouteEstimate::from_parts(distance_km, drive_duration_min, None).ok();

        let mut inner = self.inner.write().await;
        let changed = inner.route.as_ref().map(RouteKey::of) != route.as_ref().map(RouteKey::of);
        if changed {
            tracing::debug!(?route, "driving route changed");
            inner.route = route;
            inner.cached = None;
        }
        changed
    }

    /// Estimates for the stored route at the current time; empty if none
    pub async fn estimates(&self) -> Vec<ModeEstimateRecord> {
        let now = self.estimator.now();
        let peak = self.estimator.is_peak(&now);

        {
            let inner = self.inner.read().await;
            let Some(route) = inner.route else {
                return Vec::new();
            };
            if let Some(cached) = &inner.cached {
                if cached.key == RouteKey::of(&route) && cached.peak == peak {
                    return cached.estimates.clone();
                }
            }
        }

        let mut inner = self.inner.write().await;
        let Some(route) = inner.route else {
            return Vec::new();
        };

        let estimates: Vec<ModeEstimateRecord> = self
            .estimator
            .estimate(&route.at(now))
            .into_iter()
            .map(ModeEstimateRecord::from)
            .collect();

        inner.cached = Some(Cached {
            key: RouteKey::of(&route),
            peak,
            estimates: estimates.clone(),
        });
        estimates
    }

    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        *inner = Inner::default();
    }
}
