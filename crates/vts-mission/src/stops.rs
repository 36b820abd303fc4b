//! Stop synthesis.
//!
//! Two kinds of stop exist: **work** stops at each planned site (the reason
//! the vehicle is out at all) and a few incidental **transit** stops (tea
//! breaks, fuel) scattered along the route.

use vts_core::SeededRng;

use crate::mission::Mission;

/// Work stops sit this many meters before the site's arrival offset.
const WORK_STOP_LEAD_M: f64 = 20.0;

/// Work dwell window, minutes.
const WORK_DWELL_MIN: u32 = 45;
const WORK_DWELL_MAX: u32 = 90;

/// Transit dwell window, minutes.
const TRANSIT_DWELL_MIN: u32 = 5;
const TRANSIT_DWELL_MAX: u32 = 15;

/// Minimum spacing between any two stops.
const MIN_STOP_SPACING_M: f64 = 500.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopKind {
    Work,
    Transit,
}

/// A scheduled stop, consumed front-to-back as the vehicle passes it.
#[derive(Copy, Clone, Debug)]
pub struct Stop {
    /// Meters along the mission polyline.
    pub offset_m: f64,
    /// Dwell window in minutes; the agent draws the actual dwell uniformly
    /// from `[dwell_min, dwell_max]` when it arrives.
    pub dwell_min: u32,
    pub dwell_max: u32,
    pub kind: StopKind,
}

/// Synthesize the day's stops for `mission`: one work stop per site plus
/// zero to two transit stops, sorted by route offset.
pub fn generate_mission_stops(mission: &Mission, rng: &mut SeededRng) -> Vec<Stop> {
    let mut stops: Vec<Stop> = mission
        .site_offsets_m
        .iter()
        .map(|&site_m| Stop {
            offset_m: (site_m - WORK_STOP_LEAD_M).max(0.0),
            dwell_min: WORK_DWELL_MIN,
            dwell_max: WORK_DWELL_MAX,
            kind: StopKind::Work,
        })
        .collect();

    let transit_count = rng.gen_range(0..=2u32);
    for _ in 0..transit_count {
        let offset_m = rng.gen_range(0.0..mission.distance_m.max(1.0));
        let crowded = stops
            .iter()
            .any(|s| (s.offset_m - offset_m).abs() < MIN_STOP_SPACING_M);
        if crowded {
            continue;
        }
        stops.push(Stop {
            offset_m,
            dwell_min: TRANSIT_DWELL_MIN,
            dwell_max: TRANSIT_DWELL_MAX,
            kind: StopKind::Transit,
        });
    }

    stops.sort_by(|a, b| a.offset_m.total_cmp(&b.offset_m));
    stops
}
