//! Synthetic records for non-operational days.

use vts_agent::TelemetryRecord;
use vts_core::{Date, Timestamp, VehicleProfile};

/// Interval between parked records, seconds.
const PARKED_INTERVAL_SECS: i64 = 600;

/// Zero-speed records at the vehicle's depot, every ten minutes from
/// midnight to the end of `date`.  Written for Sundays and holidays so the
/// vehicle never falls silent for a whole day.
pub fn parked_day_records(profile: &VehicleProfile, date: Date) -> Vec<TelemetryRecord> {
    let end = Timestamp::at(date, 23, 59, 59);
    let mut ts = Timestamp::at_midnight(date);
    let mut records = Vec::with_capacity(144);
    while ts < end {
        records.push(TelemetryRecord {
            timestamp: ts,
            lat: profile.depot_lat,
            lon: profile.depot_lon,
            speed_knots: 0.0,
            heading_deg: 0.0,
            device_id: profile.device_id.clone(),
        });
        ts = ts.plus_secs(PARKED_INTERVAL_SECS);
    }
    records
}
