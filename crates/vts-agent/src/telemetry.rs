//! The telemetry record — the unit persisted and exported.

use serde::{Deserialize, Serialize};

use vts_core::Timestamp;

/// One time-stamped position/speed/heading sample.
///
/// Created by the agent, owned by its buffer until flush, then handed to the
/// store.  Serializes directly as a CSV partition row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub timestamp: Timestamp,
    pub lat: f64,
    pub lon: f64,
    pub speed_knots: f64,
    pub heading_deg: f64,
    pub device_id: String,
}
