//! The parallel batch driver.

use rayon::prelude::*;

use vts_agent::VehicleAgent;
use vts_core::{Date, GeoPoint, NodeId, SeededRng, ShiftWindow, VehicleProfile};
use vts_mission::{generate_mission_stops, plan_mission_from_waypoints, plan_mission_route, Mission};
use vts_network::{load_road_features, RoadNetwork};
use vts_store::{parked_day_records, TelemetryStore};

use crate::calendar::OperationalCalendar;
use crate::catalog::{PredefinedRoute, RouteCatalog};
use crate::config::FleetConfig;
use crate::error::SimResult;
use crate::feed::CheckpointFeed;

/// Buffered records that trigger a mid-day partition write.
const FLUSH_THRESHOLD: usize = 1000;

/// Outcome counts for a whole batch.  One unit is one vehicle-day.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Days simulated and persisted.
    pub driven: u64,
    /// Non-operational days written as parked records.
    pub parked: u64,
    /// Days skipped silently: validity window, disabled vehicle, or planner
    /// exhaustion.
    pub skipped: u64,
    /// Per-vehicle-day failure descriptions; siblings keep running.
    pub failures: Vec<String>,
}

impl BatchReport {
    fn absorb(&mut self, other: BatchReport) {
        self.driven += other.driven;
        self.parked += other.parked;
        self.skipped += other.skipped;
        self.failures.extend(other.failures);
    }
}

/// Run the whole fleet over the configured date range, one Rayon task per
/// vehicle.  Shared inputs (calendar, feed, catalog, store) are loaded once
/// up front; each task builds its own road network and keeps it for the
/// whole range.
pub fn run_batch(config: &FleetConfig) -> SimResult<BatchReport> {
    config.validate()?;
    let profiles = config.resolve_vehicles()?;

    let calendar = match &config.holiday_calendar {
        Some(path) => OperationalCalendar::load(path)?,
        None => OperationalCalendar::empty(),
    };
    let feed = match &config.checkpoint_feed {
        Some(path) => CheckpointFeed::load(path)?,
        None => CheckpointFeed::empty(),
    };
    let catalog = match &config.route_catalog {
        Some(path) => RouteCatalog::load(path)?,
        None => RouteCatalog::empty(),
    };
    let store = TelemetryStore::new(&config.output_dir)?;
    let dates = config.dates();

    tracing::info!(
        vehicles = profiles.len(),
        days = dates.len(),
        from = %config.start_date,
        to = %config.end_date,
        "batch starting"
    );

    let mut report = BatchReport::default();
    let tallies: Vec<BatchReport> = profiles
        .par_iter()
        .map(|profile| simulate_vehicle(config, profile, &dates, &calendar, &feed, &catalog, &store))
        .collect();
    for tally in tallies {
        report.absorb(tally);
    }

    tracing::info!(
        driven = report.driven,
        parked = report.parked,
        skipped = report.skipped,
        failures = report.failures.len(),
        "batch finished"
    );
    Ok(report)
}

/// One worker: a single vehicle across the full date range.
fn simulate_vehicle(
    config: &FleetConfig,
    profile: &VehicleProfile,
    dates: &[Date],
    calendar: &OperationalCalendar,
    feed: &CheckpointFeed,
    catalog: &RouteCatalog,
    store: &TelemetryStore,
) -> BatchReport {
    let mut report = BatchReport::default();

    if !profile.enabled {
        tracing::info!(vehicle = %profile.vehicle_id, "disabled, skipping");
        report.skipped += dates.len() as u64;
        return report;
    }

    // Zone existence was checked at resolve time.
    let zone = &config.zones[&profile.zone_id];
    let network = match load_road_features(&zone.roads) {
        Ok(network) => network,
        Err(e) => {
            report
                .failures
                .push(format!("{}: zone {} roads: {e}", profile.vehicle_id, profile.zone_id));
            return report;
        }
    };
    let Some(home) = network.nearest_node(profile.depot()) else {
        report.failures.push(format!(
            "{}: depot {} does not snap to the road graph",
            profile.vehicle_id,
            profile.depot()
        ));
        return report;
    };
    let routes = catalog.routes_for(&profile.zone_id);

    for &date in dates {
        if !profile.is_valid_on(date) {
            report.skipped += 1;
            continue;
        }
        if !calendar.is_operational(date) {
            let records = parked_day_records(profile, date);
            match store.write_day(&profile.vehicle_id, date, &records) {
                Ok(_) => report.parked += 1,
                Err(e) => report.failures.push(format!("{} {date}: {e}", profile.vehicle_id)),
            }
            continue;
        }
        match run_vehicle_day(config, profile, &network, home, &zone.landmarks, routes, feed, store, date) {
            Ok(true) => report.driven += 1,
            Ok(false) => report.skipped += 1,
            Err(e) => report.failures.push(format!("{} {date}: {e}", profile.vehicle_id)),
        }
    }
    report
}

/// Simulate and persist one operational vehicle-day.  `Ok(false)` means the
/// planner exhausted its attempts and the day was skipped.
#[allow(clippy::too_many_arguments)]
fn run_vehicle_day(
    config: &FleetConfig,
    profile: &VehicleProfile,
    network: &RoadNetwork,
    home: NodeId,
    landmarks: &[GeoPoint],
    routes: &[PredefinedRoute],
    feed: &CheckpointFeed,
    store: &TelemetryStore,
    date: Date,
) -> SimResult<bool> {
    let mut rng = SeededRng::for_vehicle_day(&profile.vehicle_id, date);

    let shift = match profile.shift {
        Some(window) => window,
        None => ShiftWindow::new(rng.gen_range(7..=9u32), rng.gen_range(18..=20u32)),
    };

    let Some(mission) = plan_day_mission(config, network, home, landmarks, routes, &mut rng) else {
        tracing::warn!(vehicle = %profile.vehicle_id, %date, "no routable mission, day skipped");
        return Ok(false);
    };
    let stops = generate_mission_stops(&mission, &mut rng);
    let checkpoints = feed.events(&profile.name, date).to_vec();

    tracing::debug!(
        vehicle = %profile.vehicle_id,
        %date,
        km = mission.distance_km(),
        stops = stops.len(),
        checkpoints = checkpoints.len(),
        "day planned"
    );

    let mut agent = VehicleAgent::begin_day(profile, date, shift, mission, stops, checkpoints, rng);
    while agent.is_active() {
        agent.tick();
        if agent.buffered() >= FLUSH_THRESHOLD {
            store.write_day(&profile.vehicle_id, date, &agent.flush())?;
        }
    }
    store.write_day(&profile.vehicle_id, date, &agent.flush())?;
    Ok(true)
}

/// Prefer a catalog route with configured probability; fall back to random
/// landmark-biased planning when the zone has no catalog or the chosen
/// route is unroutable.
fn plan_day_mission(
    config: &FleetConfig,
    network: &RoadNetwork,
    home: NodeId,
    landmarks: &[GeoPoint],
    routes: &[PredefinedRoute],
    rng: &mut SeededRng,
) -> Option<Mission> {
    if !routes.is_empty() && rng.gen_bool(config.predefined_route_bias) {
        if let Some(route) = rng.choose(routes) {
            if let Some(mission) = plan_mission_from_waypoints(network, home, &route.waypoints, rng) {
                tracing::debug!(route = %route.id, "catalog route planned");
                return Some(mission);
            }
            tracing::debug!(route = %route.id, "catalog route unroutable, falling back");
        }
    }
    plan_mission_route(
        network,
        home,
        config.min_route_km,
        config.max_route_km,
        landmarks,
        rng,
    )
}
