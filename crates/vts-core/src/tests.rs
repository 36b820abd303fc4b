//! Unit tests for vts-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GeoPoint, DEG_TO_M};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(12.958319, 77.612422);
        assert!(p.planar_distance_m(p) < 1e-9);
    }

    #[test]
    fn one_degree_is_the_fixed_ratio() {
        let a = GeoPoint::new(12.0, 77.0);
        let b = GeoPoint::new(13.0, 77.0);
        assert!((a.planar_distance_m(b) - DEG_TO_M).abs() < 1e-6);
    }

    #[test]
    fn cardinal_bearings() {
        let origin = GeoPoint::new(12.0, 77.0);
        let north = GeoPoint::new(12.1, 77.0);
        let east = GeoPoint::new(12.0, 77.1);
        let south = GeoPoint::new(11.9, 77.0);
        assert!((origin.bearing_to(north) - 0.0).abs() < 0.5);
        assert!((origin.bearing_to(east) - 90.0).abs() < 0.5);
        assert!((origin.bearing_to(south) - 180.0).abs() < 0.5);
    }
}

#[cfg(test)]
mod polyline {
    use crate::{GeoPoint, Polyline, DEG_TO_M};

    /// An L-shaped line: 0.01° east, then 0.01° north.
    fn l_line() -> Polyline {
        Polyline::new(vec![
            GeoPoint::new(12.0, 77.00),
            GeoPoint::new(12.0, 77.01),
            GeoPoint::new(12.01, 77.01),
        ])
    }

    #[test]
    fn length_sums_segments() {
        let line = l_line();
        assert!((line.length_m() - 2.0 * 0.01 * DEG_TO_M).abs() < 1e-6);
    }

    #[test]
    fn point_at_midpoints() {
        let line = l_line();
        let leg = 0.01 * DEG_TO_M;
        let mid_first = line.point_at(leg / 2.0);
        assert!((mid_first.lat - 12.0).abs() < 1e-9);
        assert!((mid_first.lon - 77.005).abs() < 1e-9);

        // Clamping past the end returns the final point.
        let end = line.point_at(line.length_m() + 500.0);
        assert!((end.lat - 12.01).abs() < 1e-9);
        assert!((end.lon - 77.01).abs() < 1e-9);
    }

    #[test]
    fn bearing_follows_the_tangent() {
        let line = l_line();
        let leg = 0.01 * DEG_TO_M;
        // First leg runs east, second leg north.
        assert!((line.bearing_at(leg * 0.5) - 90.0).abs() < 1.0);
        assert!((line.bearing_at(leg * 1.5) - 0.0).abs() < 1.0);
    }

    #[test]
    fn project_recovers_offset() {
        let line = l_line();
        let leg = 0.01 * DEG_TO_M;
        // A point slightly off the middle of the first leg projects back
        // onto that middle.
        let off = GeoPoint::new(12.0005, 77.005);
        let m = line.project(off);
        assert!((m - leg / 2.0).abs() < 1.0, "got {m}");
    }

    #[test]
    fn single_point_line_is_degenerate_but_total() {
        let line = Polyline::new(vec![GeoPoint::new(1.0, 2.0)]);
        assert_eq!(line.length_m(), 0.0);
        assert_eq!(line.point_at(100.0), GeoPoint::new(1.0, 2.0));
        assert_eq!(line.project(GeoPoint::new(5.0, 5.0)), 0.0);
    }
}

#[cfg(test)]
mod time {
    use crate::{Date, ShiftWindow, Timestamp};

    #[test]
    fn date_roundtrip_through_days() {
        for iso in ["1970-01-01", "2023-01-26", "2024-02-29", "1999-12-31"] {
            let d: Date = iso.parse().unwrap();
            assert_eq!(Date::from_unix_days(d.to_unix_days()), d);
            assert_eq!(d.to_string(), iso);
        }
    }

    #[test]
    fn bad_dates_rejected() {
        assert!("2023-13-01".parse::<Date>().is_err());
        assert!("2023/01/01".parse::<Date>().is_err());
        assert!("not-a-date".parse::<Date>().is_err());
    }

    #[test]
    fn weekday_sunday_detection() {
        // 2023-01-01 was a Sunday; 2023-01-02 a Monday.
        assert!("2023-01-01".parse::<Date>().unwrap().is_sunday());
        assert!(!"2023-01-02".parse::<Date>().unwrap().is_sunday());
    }

    #[test]
    fn timestamp_components() {
        let d: Date = "2023-04-05".parse().unwrap();
        let t = Timestamp::at(d, 10, 5, 48);
        assert_eq!(t.date(), d);
        assert_eq!((t.hour(), t.minute(), t.second()), (10, 5, 48));
        assert_eq!(t.compact_time(), "100548.000");
        assert_eq!(t.plus_minutes(60).hour(), 11);
    }

    #[test]
    fn shift_window_half_open() {
        let shift = ShiftWindow::new(9, 18);
        assert!(!shift.contains(8));
        assert!(shift.contains(9));
        assert!(shift.contains(17));
        assert!(!shift.contains(18));
        assert!(shift.is_valid());
        assert!(!ShiftWindow::new(18, 9).is_valid());
    }

    #[test]
    fn date_range_iterates_inclusive() {
        let a: Date = "2023-12-30".parse().unwrap();
        let b: Date = "2024-01-02".parse().unwrap();
        let days: Vec<String> = a.range_inclusive(b).map(|d| d.to_string()).collect();
        assert_eq!(days, ["2023-12-30", "2023-12-31", "2024-01-01", "2024-01-02"]);
    }
}

#[cfg(test)]
mod rng {
    use crate::{derive_seed, Date, SeededRng};

    fn day(iso: &str) -> Date {
        iso.parse().unwrap()
    }

    #[test]
    fn seed_is_stable() {
        let a = derive_seed("KA04AB5794", day("2023-01-02"));
        let b = derive_seed("KA04AB5794", day("2023-01-02"));
        assert_eq!(a, b);
    }

    #[test]
    fn seed_varies_with_vehicle_and_date() {
        let base = derive_seed("VEHICLE_A", day("2024-01-01"));
        assert_ne!(base, derive_seed("VEHICLE_B", day("2024-01-01")));
        assert_ne!(base, derive_seed("VEHICLE_A", day("2024-01-02")));
    }

    #[test]
    fn identical_seeds_replay_the_stream() {
        let mut r1 = SeededRng::for_vehicle_day("V1", day("2023-06-01"));
        let mut r2 = SeededRng::for_vehicle_day("V1", day("2023-06-01"));
        for _ in 0..64 {
            assert_eq!(r1.gen_range(0..1_000_000u32), r2.gen_range(0..1_000_000u32));
        }
    }
}

#[cfg(test)]
mod queue {
    use crate::Fifo;

    #[test]
    fn pops_in_insertion_order() {
        let mut q: Fifo<u32> = vec![1, 2, 3].into();
        assert_eq!(q.front(), Some(&1));
        assert_eq!(q.pop_front(), Some(1));
        q.push_back(4);
        assert_eq!(q.pop_front(), Some(2));
        assert_eq!(q.pop_front(), Some(3));
        assert_eq!(q.pop_front(), Some(4));
        assert!(q.is_empty());
        assert_eq!(q.pop_front(), None);
    }
}

#[cfg(test)]
mod profile {
    use crate::VehicleProfile;

    fn minimal() -> VehicleProfile {
        serde_json::from_value(serde_json::json!({
            "vehicle_id": "868683122112345",
            "name": "SE1_KA04AB5794_JETTING",
            "device_id": "1404231589",
            "zone_id": "SE_Zone",
            "depot_lat": 12.958319,
            "depot_lon": 77.612422
        }))
        .unwrap()
    }

    #[test]
    fn defaults_applied() {
        let p = minimal();
        assert_eq!(p.max_speed_knots, 25.0);
        assert_eq!(p.sampling_interval_secs, 25);
        assert!(p.enabled);
        assert!(p.shift.is_none());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let mut p = minimal();
        p.max_speed_knots = 0.0;
        assert!(p.validate().is_err());

        let mut p = minimal();
        p.depot_lat = 95.0;
        assert!(p.validate().is_err());

        let mut p = minimal();
        p.version = 99;
        assert!(p.validate().is_err());
    }

    #[test]
    fn validity_window() {
        let mut p = minimal();
        p.valid_from = Some("2023-02-01".parse().unwrap());
        p.valid_to = Some("2023-03-01".parse().unwrap());
        assert!(!p.is_valid_on("2023-01-15".parse().unwrap()));
        assert!(p.is_valid_on("2023-02-15".parse().unwrap()));
        assert!(!p.is_valid_on("2023-03-02".parse().unwrap()));
        assert!(p.validate().is_ok());

        p.valid_to = Some("2023-01-01".parse().unwrap());
        assert!(p.validate().is_err());
    }
}
