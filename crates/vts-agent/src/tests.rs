use vts_core::{Date, GeoPoint, Polyline, SeededRng, ShiftWindow, Timestamp, VehicleProfile, DEG_TO_M};
use vts_mission::{Mission, Stop, StopKind};

use crate::agent::{AgentState, VehicleAgent};
use crate::checkpoint::Checkpoint;
use crate::telemetry::TelemetryRecord;

/// A Monday, so the shift logic is exercised on a plain working day.
const DAY: Date = Date { year: 2023, month: 3, day: 6 };

fn profile() -> VehicleProfile {
    VehicleProfile {
        version: vts_core::profile::PROFILE_VERSION,
        vehicle_id: "350000000000001".into(),
        name: "unit-07".into(),
        device_id: "dev-07".into(),
        zone_id: "z1".into(),
        depot_lat: 0.0,
        depot_lon: 0.0,
        max_speed_knots: 25.0,
        sampling_interval_secs: 25,
        shift: Some(ShiftWindow::new(8, 17)),
        enabled: true,
        valid_from: None,
        valid_to: None,
    }
}

/// Straight east-bound route along the equator, vertices every 100 m.
fn straight_mission(length_m: f64) -> Mission {
    let mut points = Vec::new();
    let mut d = 0.0;
    while d < length_m {
        points.push(GeoPoint::new(0.0, d / DEG_TO_M));
        d += 100.0;
    }
    points.push(GeoPoint::new(0.0, length_m / DEG_TO_M));
    let polyline = Polyline::new(points);
    let distance_m = polyline.length_m();
    Mission { polyline, distance_m, site_offsets_m: Vec::new() }
}

fn agent(mission: Mission, stops: Vec<Stop>, checkpoints: Vec<Checkpoint>, seed: u64) -> VehicleAgent {
    VehicleAgent::begin_day(
        &profile(),
        DAY,
        ShiftWindow::new(8, 17),
        mission,
        stops,
        checkpoints,
        SeededRng::from_seed(seed),
    )
}

/// Drive the agent through its whole day and return the flushed records.
fn run_day(mut a: VehicleAgent) -> Vec<TelemetryRecord> {
    let mut guard = 0;
    while a.is_active() {
        a.tick();
        guard += 1;
        assert!(guard < 100_000, "day did not terminate");
    }
    a.flush()
}

mod lifecycle {
    use super::*;

    #[test]
    fn silent_and_parked_before_shift() {
        let mut a = agent(straight_mission(10_000.0), vec![], vec![], 1);
        let start = a.location();
        for _ in 0..7 * 3600 {
            a.tick();
        }
        assert_eq!(a.state(), AgentState::OffShift);
        assert_eq!(a.buffered(), 0);
        assert_eq!(a.location(), start);
        assert_eq!(a.speed_knots(), 0.0);
    }

    #[test]
    fn day_ends_at_2359() {
        let mut a = agent(straight_mission(10_000.0), vec![], vec![], 2);
        let mut ticks = 0i64;
        while a.is_active() {
            a.tick();
            ticks += 1;
            assert!(ticks <= 86_400);
        }
        assert!(a.clock() >= Timestamp::at(DAY, 23, 59, 0));
        assert!(!a.is_active());
        let clock = a.clock();
        a.tick();
        assert_eq!(a.clock(), clock, "inactive agent must not advance");
    }

    #[test]
    fn all_records_fall_inside_the_shift() {
        let records = run_day(agent(straight_mission(200_000.0), vec![], vec![], 3));
        assert!(!records.is_empty());
        for r in &records {
            let hour = r.timestamp.hour();
            assert!((8..17).contains(&hour), "record at {} outside shift", r.timestamp);
        }
    }

    #[test]
    fn returns_off_shift_after_hours() {
        let mut a = agent(straight_mission(200_000.0), vec![], vec![], 4);
        let start = a.location();
        for _ in 0..18 * 3600 {
            a.tick();
        }
        assert_eq!(a.state(), AgentState::OffShift);
        assert_eq!(a.speed_knots(), 0.0);
        assert_eq!(a.location(), start);
    }
}

mod driving {
    use super::*;

    #[test]
    fn speed_never_exceeds_congestion_ceiling() {
        // Clear-road band tops out at 0.8 of max, plus at most 1 kn jitter.
        let max = 25.0 * 0.8 + 1.0;
        for seed in 0..8u64 {
            let records = run_day(agent(straight_mission(200_000.0), vec![], vec![], seed));
            for r in &records {
                assert!(r.speed_knots >= 0.0);
                assert!(r.speed_knots <= max + 1e-9, "speed {} over ceiling", r.speed_knots);
            }
        }
    }

    #[test]
    fn progress_is_monotonic_without_checkpoints() {
        let mut a = agent(straight_mission(200_000.0), vec![], vec![], 5);
        let mut last = 0.0;
        while a.is_active() {
            a.tick();
            assert!(a.progress_m() >= last, "progress moved backwards");
            last = a.progress_m();
        }
    }

    #[test]
    fn emission_cadence_matches_sampling_interval() {
        let records = run_day(agent(straight_mission(200_000.0), vec![], vec![], 6));
        // First record when the shift opens, then one every interval until
        // the shift closes: 08:00:00 + 25 s steps up to 16:59:59.
        assert_eq!(records.len(), 1 + 32_399 / 25);
        assert_eq!(records[0].timestamp, Timestamp::at(DAY, 8, 0, 0));
        for pair in records.windows(2) {
            assert_eq!(pair[1].timestamp.since(pair[0].timestamp), 25);
        }
    }

    #[test]
    fn finishes_short_route_and_parks_at_its_end() {
        let mission = straight_mission(500.0);
        let end = mission.polyline.point_at(mission.distance_m);
        let total = mission.distance_m;
        let mut a = agent(mission, vec![], vec![], 7);
        for _ in 0..9 * 3600 {
            a.tick();
            if a.state() == AgentState::RouteFinished {
                break;
            }
        }
        assert_eq!(a.state(), AgentState::RouteFinished);
        assert_eq!(a.progress_m(), total);
        assert_eq!(a.speed_knots(), 0.0);
        assert!(a.location().planar_distance_m(end) < 1e-6);
    }

    #[test]
    fn identical_seeds_give_identical_days() {
        let a = run_day(agent(straight_mission(30_000.0), vec![], vec![], 42));
        let b = run_day(agent(straight_mission(30_000.0), vec![], vec![], 42));
        assert_eq!(a, b);
    }
}

mod stops {
    use super::*;

    fn one_stop(offset_m: f64) -> Stop {
        Stop { offset_m, dwell_min: 2, dwell_max: 3, kind: StopKind::Work }
    }

    #[test]
    fn dwell_snaps_to_offset_with_zero_speed() {
        let mut a = agent(straight_mission(5_000.0), vec![one_stop(500.0)], vec![], 8);
        let mut dwell_ticks = 0u32;
        let mut seen_dwell = false;
        for _ in 0..10 * 3600 {
            a.tick();
            if a.state() == AgentState::Dwelling {
                seen_dwell = true;
                dwell_ticks += 1;
                assert_eq!(a.progress_m(), 500.0, "dwell must pin the stop offset");
                assert_eq!(a.speed_knots(), 0.0);
            } else if seen_dwell {
                break;
            }
        }
        assert!(seen_dwell);
        // Drawn uniformly from 2..=3 minutes.
        assert!((2 * 60..=3 * 60 + 1).contains(&dwell_ticks), "dwelled {dwell_ticks}s");
    }

    #[test]
    fn stops_are_taken_in_offset_order() {
        let stops = vec![one_stop(400.0), one_stop(900.0)];
        let mut a = agent(straight_mission(5_000.0), stops, vec![], 9);
        let mut dwell_offsets = Vec::new();
        for _ in 0..11 * 3600 {
            a.tick();
            if a.state() == AgentState::Dwelling && dwell_offsets.last() != Some(&a.progress_m()) {
                dwell_offsets.push(a.progress_m());
            }
        }
        assert_eq!(dwell_offsets, vec![400.0, 900.0]);
    }
}

mod checkpoints {
    use super::*;

    fn on_route(offset_m: f64, ts: Timestamp) -> Checkpoint {
        Checkpoint { timestamp: ts, lat: 0.0, lon: offset_m / DEG_TO_M }
    }

    #[test]
    fn forces_emission_even_off_shift() {
        let cp = on_route(1_000.0, Timestamp::at(DAY, 6, 0, 0));
        let mut a = agent(straight_mission(5_000.0), vec![], vec![cp], 10);
        for _ in 0..6 * 3600 {
            a.tick();
        }
        let records = a.flush();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.timestamp, Timestamp::at(DAY, 6, 0, 0));
        assert_eq!(r.speed_knots, 0.0);
        assert!((r.lon - 1_000.0 / DEG_TO_M).abs() < 1e-12);
    }

    #[test]
    fn reprojects_route_progress_onto_the_fix() {
        let cp = on_route(1_500.0, Timestamp::at(DAY, 8, 0, 30));
        let mut a = agent(straight_mission(5_000.0), vec![], vec![cp], 11);
        while a.clock() < Timestamp::at(DAY, 8, 0, 30) {
            a.tick();
        }
        // The reconciling tick still runs its driving step, so progress sits
        // at the fix plus at most one tick of travel.
        assert!(a.progress_m() >= 1_500.0);
        assert!(a.progress_m() < 1_515.0, "got {}", a.progress_m());
        // Progress resumes forward from the forced position.
        let before = a.progress_m();
        for _ in 0..60 {
            a.tick();
        }
        assert!(a.progress_m() > before);
    }

    #[test]
    fn stop_left_behind_by_a_fix_is_skipped_not_revisited() {
        let stop = Stop { offset_m: 300.0, dwell_min: 2, dwell_max: 3, kind: StopKind::Work };
        let cp = on_route(1_500.0, Timestamp::at(DAY, 8, 0, 10));
        let mut a = agent(straight_mission(5_000.0), vec![stop], vec![cp], 12);
        for _ in 0..9 * 3600 {
            a.tick();
            assert_ne!(a.state(), AgentState::Dwelling, "passed stop must not trigger a dwell");
        }
    }
}

mod flush {
    use super::*;

    #[test]
    fn injected_records_interleave_by_timestamp() {
        let mut a = agent(straight_mission(30_000.0), vec![], vec![], 13);
        for _ in 0..9 * 3600 {
            a.tick();
        }
        let external = TelemetryRecord {
            timestamp: Timestamp::at(DAY, 2, 30, 0),
            lat: 0.0,
            lon: 0.0,
            speed_knots: 0.0,
            heading_deg: 0.0,
            device_id: "dev-07".into(),
        };
        a.inject_external_records([external.clone()]);
        let records = a.flush();
        assert_eq!(records[0], external);
        for pair in records.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn flush_drains_the_buffer() {
        let mut a = agent(straight_mission(30_000.0), vec![], vec![], 14);
        for _ in 0..9 * 3600 {
            a.tick();
        }
        assert!(a.buffered() > 0);
        assert!(!a.flush().is_empty());
        assert_eq!(a.buffered(), 0);
        assert!(a.flush().is_empty());
    }
}
