//! Geographic coordinate type and planar distance/bearing helpers.
//!
//! The whole system uses a single fixed degree-to-meter ratio rather than a
//! true geodesic projection: distances are Euclidean in degree space scaled
//! by [`DEG_TO_M`].  At city scale the error is small and, more importantly,
//! graph weights, route offsets, and polyline interpolation all agree on the
//! same metric, so progress-meters never drift against stored geometry.

use serde::{Deserialize, Serialize};

/// Fixed degree→meter conversion ratio (~1° of latitude in meters).
pub const DEG_TO_M: f64 = 111_139.0;

/// 1 knot in meters per second.
pub const KNOTS_TO_MPS: f64 = 0.514444;

/// A WGS-84 geographic coordinate.
///
/// `f64` rather than `f32`: the degrees-minutes telemetry export must
/// round-trip within ~3 m, which leaves no headroom for single-precision
/// rounding at 4 decimal minutes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Planar distance in meters: Euclidean in degree space × [`DEG_TO_M`].
    #[inline]
    pub fn planar_distance_m(self, other: GeoPoint) -> f64 {
        let dlat = other.lat - self.lat;
        let dlon = other.lon - self.lon;
        (dlat * dlat + dlon * dlon).sqrt() * DEG_TO_M
    }

    /// Compass bearing from `self` to `other`, in degrees `[0, 360)`.
    pub fn bearing_to(self, other: GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let x = dlon.sin() * lat2.cos();
        let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

        (x.atan2(y).to_degrees() + 360.0) % 360.0
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
