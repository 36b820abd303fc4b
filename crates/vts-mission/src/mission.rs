//! The `Mission` type.

use vts_core::Polyline;

/// One day's planned closed-loop route.
///
/// Owned by the vehicle agent for exactly one simulated day and discarded
/// after the telemetry buffer is flushed.
#[derive(Clone, Debug)]
pub struct Mission {
    /// Full route geometry, depot → sites… → depot.
    pub polyline: Polyline,

    /// Total route length in meters (sum of true leg distances).
    pub distance_m: f64,

    /// Cumulative distance at which each planned site is reached, in route
    /// order.  Work stops are placed just short of these offsets.
    pub site_offsets_m: Vec<f64>,
}

impl Mission {
    #[inline]
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    /// Number of planned intermediate sites.
    #[inline]
    pub fn site_count(&self) -> usize {
        self.site_offsets_m.len()
    }
}
