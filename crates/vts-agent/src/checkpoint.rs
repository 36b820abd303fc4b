//! External checkpoints — fixed `(time, lat, lon)` the agent must hit exactly.

use vts_core::{GeoPoint, Timestamp};

/// An externally supplied fix that overrides normal physics when its
/// timestamp is reached.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Checkpoint {
    pub timestamp: Timestamp,
    pub lat: f64,
    pub lon: f64,
}

impl Checkpoint {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}
