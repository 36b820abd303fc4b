//! Vehicle profile configuration.
//!
//! Loaded once per vehicle at batch start and validated immediately —
//! a malformed profile fails the load, never the simulation mid-day.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::geo::GeoPoint;
use crate::time::{Date, ShiftWindow};

/// The profile format version this build understands.
pub const PROFILE_VERSION: u32 = 1;

/// Identity and operating parameters of one simulated vehicle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Format version; must equal [`PROFILE_VERSION`].
    #[serde(default = "default_version")]
    pub version: u32,

    /// Stable identifier (IMEI-style).  Keys telemetry partitions and the
    /// per-day RNG seed.
    pub vehicle_id: String,

    /// Human-readable name; also the join key into the checkpoint feed.
    pub name: String,

    /// Device identifier echoed into every telemetry record.
    #[serde(default = "default_device_id")]
    pub device_id: String,

    /// Zone this vehicle belongs to; selects road geometry and routes.
    pub zone_id: String,

    pub depot_lat: f64,
    pub depot_lon: f64,

    #[serde(default = "default_max_speed_knots")]
    pub max_speed_knots: f64,

    /// Target seconds between ordinary telemetry emissions.
    #[serde(default = "default_sampling_interval")]
    pub sampling_interval_secs: u32,

    /// Pinned shift window.  When absent the batch driver draws one per day
    /// (start 7–9, end 18–20) from the vehicle-day RNG.
    #[serde(default)]
    pub shift: Option<ShiftWindow>,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Inclusive validity window; days outside it are silently skipped.
    #[serde(default)]
    pub valid_from: Option<Date>,
    #[serde(default)]
    pub valid_to: Option<Date>,
}

fn default_version() -> u32 {
    PROFILE_VERSION
}
fn default_device_id() -> String {
    "unknown".to_owned()
}
fn default_max_speed_knots() -> f64 {
    25.0
}
fn default_sampling_interval() -> u32 {
    25
}
fn default_true() -> bool {
    true
}

impl VehicleProfile {
    pub fn depot(&self) -> GeoPoint {
        GeoPoint::new(self.depot_lat, self.depot_lon)
    }

    /// Fail-fast structural validation, run at load time.
    pub fn validate(&self) -> CoreResult<()> {
        let fail = |msg: String| Err(CoreError::Config(msg));

        if self.version != PROFILE_VERSION {
            return fail(format!(
                "profile {}: unsupported version {} (expected {PROFILE_VERSION})",
                self.vehicle_id, self.version
            ));
        }
        if self.vehicle_id.is_empty() {
            return fail("profile with empty vehicle_id".into());
        }
        if self.zone_id.is_empty() {
            return fail(format!("profile {}: empty zone_id", self.vehicle_id));
        }
        if !(-90.0..=90.0).contains(&self.depot_lat)
            || !(-180.0..=180.0).contains(&self.depot_lon)
        {
            return fail(format!(
                "profile {}: depot ({}, {}) out of range",
                self.vehicle_id, self.depot_lat, self.depot_lon
            ));
        }
        if self.max_speed_knots <= 0.0 {
            return fail(format!(
                "profile {}: max_speed_knots must be positive",
                self.vehicle_id
            ));
        }
        if self.sampling_interval_secs == 0 {
            return fail(format!(
                "profile {}: sampling_interval_secs must be positive",
                self.vehicle_id
            ));
        }
        if let Some(shift) = self.shift {
            if !shift.is_valid() {
                return fail(format!(
                    "profile {}: shift window {}..{} invalid",
                    self.vehicle_id, shift.start_hour, shift.end_hour
                ));
            }
        }
        if let (Some(from), Some(to)) = (self.valid_from, self.valid_to) {
            if from > to {
                return fail(format!(
                    "profile {}: valid_from {from} after valid_to {to}",
                    self.vehicle_id
                ));
            }
        }
        Ok(())
    }

    /// `true` if `date` falls inside the profile's validity window.
    pub fn is_valid_on(&self, date: Date) -> bool {
        if let Some(from) = self.valid_from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.valid_to {
            if date > to {
                return false;
            }
        }
        true
    }
}
