//! The vehicle agent and its tick loop.
//!
//! # Tick model
//!
//! Time advances in fixed 1-second physics steps.  A small step keeps the
//! stop logic exact: a stop can never be tunneled past, because the distance
//! covered per tick is far below the stop-spacing floor.  One tick completes
//! fully — checkpoint reconciliation, state transition, physics, telemetry
//! check — before the next begins.
//!
//! # State machine
//!
//! ```text
//!              clock enters shift           next stop reached
//!  OFF_SHIFT ───────────────────▶ DRIVING ◀───────────────────▶ DWELLING
//!      ▲                            │    dwell timer expired
//!      │ clock exits shift          │ progress reaches route end
//!      └───────(any state)          ▼
//!                              ROUTE_FINISHED
//! ```
//!
//! Off-shift the vehicle sits parked at the route start with telemetry
//! suppressed; forced checkpoints are the only exception.

use vts_core::{Fifo, GeoPoint, SeededRng, ShiftWindow, Timestamp, VehicleProfile, KNOTS_TO_MPS};
use vts_mission::{Mission, Stop};

use crate::checkpoint::Checkpoint;
use crate::telemetry::TelemetryRecord;

/// Physics step, seconds.
const TICK_SECS: i64 = 1;

/// Congestion band used on most ticks (fraction of max speed).
const CONGESTED_FRACTION: std::ops::Range<f64> = 0.15..0.55;

/// Occasional clear-road band.
const CLEAR_FRACTION: std::ops::Range<f64> = 0.6..0.8;

/// Probability of a clear-road draw on any driving tick.
const CLEAR_ROAD_PROB: f64 = 0.10;

/// Additive speed jitter, knots.
const SPEED_JITTER_KNOTS: std::ops::Range<f64> = -1.0..1.0;

/// Discrete state of the agent within one simulated day.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AgentState {
    /// Parked at the route start outside the shift window.  Initial state.
    OffShift,
    Driving,
    /// Parked at a scheduled stop until the dwell timer expires.
    Dwelling,
    /// Terminal for the day: idle at the route's end.
    RouteFinished,
}

/// Simulates one vehicle through one day, buffering telemetry.
pub struct VehicleAgent {
    // Vehicle parameters (from the profile).
    device_id: String,
    max_speed_knots: f64,
    sampling_interval_secs: u32,

    // Day state.
    clock: Timestamp,
    day_end: Timestamp,
    shift: ShiftWindow,
    state: AgentState,
    location: GeoPoint,
    heading_deg: f64,
    speed_knots: f64,
    progress_m: f64,
    mission: Mission,
    stops: Fifo<Stop>,
    checkpoints: Fifo<Checkpoint>,
    dwell_until: Option<Timestamp>,
    last_emit: Option<Timestamp>,
    active: bool,

    rng: SeededRng,
    buffer: Vec<TelemetryRecord>,
}

impl VehicleAgent {
    /// Set up one simulated day.
    ///
    /// `stops` and `checkpoints` must be ordered (by offset and timestamp
    /// respectively); both are consumed front-to-back.  The clock starts at
    /// midnight of `date` and the vehicle parks at the route start.
    #[allow(clippy::too_many_arguments)]
    pub fn begin_day(
        profile: &VehicleProfile,
        date: vts_core::Date,
        shift: ShiftWindow,
        mission: Mission,
        stops: Vec<Stop>,
        checkpoints: Vec<Checkpoint>,
        rng: SeededRng,
    ) -> Self {
        let start = mission.polyline.start();
        Self {
            device_id: profile.device_id.clone(),
            max_speed_knots: profile.max_speed_knots,
            sampling_interval_secs: profile.sampling_interval_secs,
            clock: Timestamp::at_midnight(date),
            day_end: Timestamp::at(date, 23, 59, 0),
            shift,
            state: AgentState::OffShift,
            location: start,
            heading_deg: 0.0,
            speed_knots: 0.0,
            progress_m: 0.0,
            mission,
            stops: stops.into(),
            checkpoints: checkpoints.into(),
            dwell_until: None,
            last_emit: None,
            active: true,
            rng,
            buffer: Vec::new(),
        }
    }

    /// `false` once the clock has run out for the day.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn clock(&self) -> Timestamp {
        self.clock
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn speed_knots(&self) -> f64 {
        self.speed_knots
    }

    pub fn progress_m(&self) -> f64 {
        self.progress_m
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Advance the simulation by one second.
    pub fn tick(&mut self) {
        if !self.active {
            return;
        }

        self.clock = self.clock.plus_secs(TICK_SECS);
        if self.clock >= self.day_end {
            self.active = false;
        }

        self.reconcile_checkpoint();
        self.step_state_machine();
        self.maybe_emit(false);
    }

    /// Pre-seed the buffer with externally supplied records.  These bypass
    /// the off-shift suppression entirely; ordering is restored at flush.
    pub fn inject_external_records(&mut self, records: impl IntoIterator<Item = TelemetryRecord>) {
        self.buffer.extend(records);
    }

    /// Drain the buffer for the store, sorted by timestamp.
    pub fn flush(&mut self) -> Vec<TelemetryRecord> {
        let mut out = std::mem::take(&mut self.buffer);
        out.sort_by_key(|r| r.timestamp);
        out
    }

    // ── Checkpoint reconciliation ─────────────────────────────────────────

    /// When the front checkpoint's time has been reached or passed, force
    /// the agent onto it: clock, position and speed are overwritten, a
    /// record is emitted immediately, and route progress is re-projected so
    /// the next ordinary tick continues from the forced position instead of
    /// snapping back.
    fn reconcile_checkpoint(&mut self) {
        let Some(cp) = self.checkpoints.front().copied() else {
            return;
        };
        if self.clock < cp.timestamp {
            return;
        }

        tracing::debug!(at = %cp.timestamp, "checkpoint enforced, physics overridden");
        self.clock = cp.timestamp;
        self.location = cp.position();
        self.speed_knots = 0.0;
        self.emit(true);
        self.checkpoints.pop_front();

        self.progress_m = self.mission.polyline.project(self.location);
    }

    // ── State machine ─────────────────────────────────────────────────────

    fn step_state_machine(&mut self) {
        let hour = self.clock.hour();

        if self.shift.contains(hour) {
            if self.state == AgentState::OffShift {
                tracing::debug!(at = %self.clock, "shift start");
                self.state = AgentState::Driving;
            }
            match self.state {
                AgentState::RouteFinished => self.speed_knots = 0.0,
                AgentState::Dwelling => self.handle_dwelling(),
                AgentState::Driving => self.handle_driving(),
                AgentState::OffShift => unreachable!("transitioned above"),
            }
        } else if self.state != AgentState::OffShift || hour < self.shift.start_hour {
            self.state = AgentState::OffShift;
            self.speed_knots = 0.0;
            self.location = self.mission.polyline.start();
        }
    }

    fn handle_dwelling(&mut self) {
        self.speed_knots = 0.0;
        if let Some(until) = self.dwell_until {
            if self.clock >= until {
                tracing::debug!(at = %self.clock, "resuming from stop");
                self.state = AgentState::Driving;
                self.dwell_until = None;
            }
        }
    }

    fn handle_driving(&mut self) {
        // Congestion model: crawl most of the time, occasionally a clear run.
        let mut fraction = self.rng.gen_range(CONGESTED_FRACTION);
        if self.rng.gen_bool(CLEAR_ROAD_PROB) {
            fraction = self.rng.gen_range(CLEAR_FRACTION);
        }
        let target_knots = (self.max_speed_knots * fraction
            + self.rng.gen_range(SPEED_JITTER_KNOTS))
        .max(0.0);
        let move_dist_m = target_knots * KNOTS_TO_MPS * TICK_SECS as f64;

        // Stops already behind us can only appear after a forced checkpoint
        // jumped progress forward; they are passed, not revisited.
        while self.stops.front().is_some_and(|s| s.offset_m <= self.progress_m) {
            self.stops.pop_front();
        }

        // Arrive exactly at the next stop if this tick would cross it.
        if let Some(stop) = self.stops.front().copied() {
            let dist_to_stop = stop.offset_m - self.progress_m;
            if dist_to_stop <= move_dist_m {
                self.progress_m = stop.offset_m;
                self.speed_knots = 0.0;
                self.state = AgentState::Dwelling;
                let dwell_min = self.rng.gen_range(stop.dwell_min..=stop.dwell_max);
                self.dwell_until = Some(self.clock.plus_minutes(dwell_min as i64));
                self.stops.pop_front();
                tracing::debug!(at = %self.clock, dwell_min, "stopping");
                self.update_position_on_route();
                return;
            }
        }

        self.progress_m += move_dist_m;
        self.speed_knots = target_knots;

        if self.progress_m >= self.mission.distance_m {
            self.progress_m = self.mission.distance_m;
            self.state = AgentState::RouteFinished;
            self.speed_knots = 0.0;
            tracing::debug!(at = %self.clock, "route finished, waiting for shift end");
        }
        self.update_position_on_route();
    }

    fn update_position_on_route(&mut self) {
        self.location = self.mission.polyline.point_at(self.progress_m);
        self.heading_deg = self.mission.polyline.bearing_at(self.progress_m);
    }

    // ── Telemetry ─────────────────────────────────────────────────────────

    /// Append a record when the sampling interval has elapsed (or always,
    /// when forced by a checkpoint).  Ordinary emission is suppressed while
    /// off shift.
    fn maybe_emit(&mut self, force: bool) {
        match self.last_emit {
            None => self.emit(force),
            Some(last) => {
                if self.clock.since(last) >= self.sampling_interval_secs as i64 {
                    self.emit(force);
                }
            }
        }
    }

    fn emit(&mut self, force: bool) {
        if !force && self.state == AgentState::OffShift {
            return;
        }
        self.buffer.push(TelemetryRecord {
            timestamp: self.clock,
            lat: self.location.lat,
            lon: self.location.lon,
            speed_knots: self.speed_knots,
            heading_deg: self.heading_deg,
            device_id: self.device_id.clone(),
        });
        self.last_emit = Some(self.clock);
    }
}
