//! Mission planners.
//!
//! Both planners assemble a closed tour leg-by-leg through seeded
//! `shortest_path` calls, concatenating leg geometries (dropping the shared
//! junction point) and accumulating true distances.  The only source of
//! randomness is the caller's RNG, so the same `(vehicle, date)` seed always
//! reproduces the same mission byte-for-byte.

use vts_core::{GeoPoint, NodeId, SeededRng};
use vts_network::RoadNetwork;

use crate::mission::Mission;

/// Attempt budget for the random planner before the day is given up.
const MAX_ATTEMPTS: u32 = 50;

/// Site-count range for random missions.
const SITE_COUNT: std::ops::RangeInclusive<u32> = 2..=8;

/// Plan a random (landmark-biased) closed mission from `home`.
///
/// Per attempt: draw a site count in [2, 8]; take sites from the shuffled
/// landmark list first (snapped to their nearest graph nodes), topping up
/// with uniformly random graph nodes; route the closed tour; accept when the
/// total distance lands in `[min_km, max_km]`.
///
/// Returns `None` after [`MAX_ATTEMPTS`] failed attempts — the caller skips
/// the day rather than emit a partial mission.
pub fn plan_mission_route(
    network: &RoadNetwork,
    home: NodeId,
    min_km: f64,
    max_km: f64,
    landmarks: &[GeoPoint],
    rng: &mut SeededRng,
) -> Option<Mission> {
    for attempt in 1..=MAX_ATTEMPTS {
        let site_count = rng.gen_range(SITE_COUNT) as usize;

        let mut sites: Vec<NodeId> = Vec::with_capacity(site_count);
        let mut pool: Vec<GeoPoint> = landmarks.to_vec();
        rng.shuffle(&mut pool);
        for centroid in pool.into_iter().take(site_count) {
            if let Some(node) = network.nearest_node(centroid) {
                sites.push(node);
            }
        }
        while sites.len() < site_count {
            sites.push(network.random_node(rng)?);
        }

        let mut tour = Vec::with_capacity(site_count + 2);
        tour.push(home);
        tour.extend(&sites);
        tour.push(home);

        let Some(mission) = assemble_tour(network, &tour, rng) else {
            continue; // a leg was unroutable — fresh draw
        };

        let km = mission.distance_km();
        if (min_km..=max_km).contains(&km) {
            tracing::debug!(attempt, km, sites = site_count, "mission accepted");
            return Some(mission);
        }
    }
    tracing::debug!(attempts = MAX_ATTEMPTS, "mission planning exhausted");
    None
}

/// Plan a mission over a predefined waypoint list (zone route catalogs).
///
/// Same leg-by-leg assembly as [`plan_mission_route`]; every waypoint is a
/// recorded site.  Returns `None` if any waypoint fails to snap or any leg
/// is unroutable.
pub fn plan_mission_from_waypoints(
    network: &RoadNetwork,
    home: NodeId,
    waypoints: &[GeoPoint],
    rng: &mut SeededRng,
) -> Option<Mission> {
    if waypoints.is_empty() {
        return None;
    }
    let mut tour = Vec::with_capacity(waypoints.len() + 2);
    tour.push(home);
    for wp in waypoints {
        tour.push(network.nearest_node(*wp)?);
    }
    tour.push(home);
    assemble_tour(network, &tour, rng)
}

/// Route each consecutive node pair with stochastic weights, stitch the leg
/// geometries, and record the cumulative offset of every intermediate stop.
fn assemble_tour(
    network: &RoadNetwork,
    tour: &[NodeId],
    rng: &mut SeededRng,
) -> Option<Mission> {
    debug_assert!(tour.len() >= 2);

    let mut points: Vec<GeoPoint> = Vec::new();
    let mut distance_m = 0.0;
    let mut site_offsets_m = Vec::with_capacity(tour.len() - 2);

    for (i, leg) in tour.windows(2).enumerate() {
        let route = network.shortest_path(leg[0], leg[1], Some(rng))?;
        distance_m += route.distance_m;
        let skip = usize::from(!points.is_empty());
        points.extend(route.points.into_iter().skip(skip));

        // Arrival offset of every intermediate site (not the final return home).
        if i + 2 < tour.len() {
            site_offsets_m.push(distance_m);
        }
    }

    if points.is_empty() {
        return None;
    }
    Some(Mission {
        polyline: vts_core::Polyline::new(points),
        distance_m,
        site_offsets_m,
    })
}
