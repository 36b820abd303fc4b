//! Fleet configuration.
//!
//! A single JSON document describes the whole batch: the vehicles (inline or
//! as paths to per-vehicle profile files), the zones with their road
//! geometry, the optional route catalog / checkpoint feed / holiday
//! calendar, the date range, and the output location.  The whole document is
//! validated at load time so a bad batch fails before any worker starts.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use vts_core::{Date, GeoPoint, VehicleProfile};

use crate::error::{SimError, SimResult};

/// The fleet config format version this build understands.
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Probability of picking a catalog route over random planning, when the
/// zone has catalog routes.
fn default_route_bias() -> f64 {
    0.8
}

fn default_min_route_km() -> f64 {
    2.0
}

fn default_max_route_km() -> f64 {
    25.0
}

/// A vehicle entry: either a path to a profile JSON file or the profile
/// written out inline.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum VehicleSource {
    Path(PathBuf),
    Inline(VehicleProfile),
}

/// Per-zone inputs.
#[derive(Clone, Debug, Deserialize)]
pub struct ZoneConfig {
    /// GeoJSON file holding the zone's road geometry.
    pub roads: PathBuf,

    /// Landmark points the random planner biases its sites toward.
    #[serde(default)]
    pub landmarks: Vec<GeoPoint>,
}

/// The whole batch description.
#[derive(Clone, Debug, Deserialize)]
pub struct FleetConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    pub vehicles: Vec<VehicleSource>,
    pub zones: HashMap<String, ZoneConfig>,

    #[serde(default)]
    pub route_catalog: Option<PathBuf>,
    #[serde(default)]
    pub checkpoint_feed: Option<PathBuf>,
    #[serde(default)]
    pub holiday_calendar: Option<PathBuf>,

    pub start_date: Date,
    pub end_date: Date,
    pub output_dir: PathBuf,

    #[serde(default = "default_route_bias")]
    pub predefined_route_bias: f64,
    #[serde(default = "default_min_route_km")]
    pub min_route_km: f64,
    #[serde(default = "default_max_route_km")]
    pub max_route_km: f64,
}

impl FleetConfig {
    /// Load and validate a fleet config from a JSON file.
    pub fn load(path: &Path) -> SimResult<Self> {
        let text = fs::read_to_string(path)?;
        let config: FleetConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural validation; run before any worker launches.
    pub fn validate(&self) -> SimResult<()> {
        let fail = |msg: String| Err(SimError::Config(msg));

        if self.version != CONFIG_VERSION {
            return fail(format!(
                "unsupported config version {} (expected {CONFIG_VERSION})",
                self.version
            ));
        }
        if self.vehicles.is_empty() {
            return fail("no vehicles configured".into());
        }
        if self.zones.is_empty() {
            return fail("no zones configured".into());
        }
        if self.start_date > self.end_date {
            return fail(format!(
                "start_date {} after end_date {}",
                self.start_date, self.end_date
            ));
        }
        if !(0.0..=1.0).contains(&self.predefined_route_bias) {
            return fail(format!(
                "predefined_route_bias {} outside [0, 1]",
                self.predefined_route_bias
            ));
        }
        if !(self.min_route_km >= 0.0 && self.min_route_km <= self.max_route_km) {
            return fail(format!(
                "route length range [{}, {}] km is malformed",
                self.min_route_km, self.max_route_km
            ));
        }
        Ok(())
    }

    /// Resolve every vehicle entry into a validated profile.
    ///
    /// Each profile's zone must exist in [`zones`](Self::zones); a profile
    /// that fails its own validation fails the whole load.
    pub fn resolve_vehicles(&self) -> SimResult<Vec<VehicleProfile>> {
        let mut profiles = Vec::with_capacity(self.vehicles.len());
        for source in &self.vehicles {
            let profile = match source {
                VehicleSource::Inline(p) => p.clone(),
                VehicleSource::Path(path) => {
                    let text = fs::read_to_string(path)?;
                    serde_json::from_str(&text)?
                }
            };
            profile.validate()?;
            if !self.zones.contains_key(&profile.zone_id) {
                return Err(SimError::Config(format!(
                    "vehicle {} references unknown zone {}",
                    profile.vehicle_id, profile.zone_id
                )));
            }
            profiles.push(profile);
        }
        Ok(profiles)
    }

    /// All simulation dates, in calendar order.
    pub fn dates(&self) -> Vec<Date> {
        self.start_date.range_inclusive(self.end_date).collect()
    }
}
