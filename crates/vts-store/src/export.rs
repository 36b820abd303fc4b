//! Fixed-format tracker log export.
//!
//! One record renders as one line:
//!
//! ```text
//! imei:868...,tracker,140...,,F,060722.000,A,1255.4187,N,07733.1281,E,0.81,121.83;
//! ```
//!
//! The coordinate fields use NMEA-style degrees-minutes: `DDMM.MMMM` for
//! latitude, `DDDMM.MMMM` for longitude, hemisphere carried separately.
//! The format is consumed by an external parser and must not change.

use std::fs;
use std::path::{Path, PathBuf};

use vts_agent::TelemetryRecord;
use vts_core::Date;

use crate::error::StoreResult;
use crate::store::TelemetryStore;

/// Convert decimal degrees to `DDMM.MMMM` (`DDDMM.MMMM` for longitude).
/// The sign is dropped; it travels in the hemisphere field.
pub fn decimal_to_dmm(degrees: f64, longitude: bool) -> String {
    let val = degrees.abs();
    let whole = val.trunc();
    let minutes = (val - whole) * 60.0;
    if longitude {
        format!("{:03}{minutes:07.4}", whole as u32)
    } else {
        format!("{:02}{minutes:07.4}", whole as u32)
    }
}

/// NMEA hemisphere letter for a signed coordinate.
pub fn hemisphere(degrees: f64, longitude: bool) -> char {
    match (longitude, degrees >= 0.0) {
        (true, true) => 'E',
        (true, false) => 'W',
        (false, true) => 'N',
        (false, false) => 'S',
    }
}

/// Render one record as a tracker log line.
pub fn tracker_line(vehicle_id: &str, r: &TelemetryRecord) -> String {
    format!(
        "imei:{vehicle_id},tracker,{device},,F,{time},A,{lat},{lat_h},{lon},{lon_h},{speed:.2},{heading:.2};",
        device = r.device_id,
        time = r.timestamp.compact_time(),
        lat = decimal_to_dmm(r.lat, false),
        lat_h = hemisphere(r.lat, false),
        lon = decimal_to_dmm(r.lon, true),
        lon_h = hemisphere(r.lon, true),
        speed = r.speed_knots,
        heading = r.heading_deg,
    )
}

impl TelemetryStore {
    /// Export one vehicle-day partition as a tracker text log.
    ///
    /// Writes to `out`, or to `<base>/{vehicle_id}_{date}.txt` when `out` is
    /// `None`, and returns the path written.  A missing partition is
    /// [`StoreError::MissingPartition`](crate::StoreError::MissingPartition).
    pub fn export_tracker_log(
        &self,
        vehicle_id: &str,
        date: Date,
        out: Option<&Path>,
    ) -> StoreResult<PathBuf> {
        let records = self.read_day(vehicle_id, date)?;

        let lines: Vec<String> = records.iter().map(|r| tracker_line(vehicle_id, r)).collect();
        let path = match out {
            Some(p) => p.to_path_buf(),
            None => self.base_dir().join(format!("{vehicle_id}_{date}.txt")),
        };
        fs::write(&path, lines.join("\n"))?;
        tracing::debug!(vehicle_id, %date, lines = lines.len(), "tracker log exported");
        Ok(path)
    }
}
