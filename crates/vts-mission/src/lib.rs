//! `vts-mission` — daily mission planning.
//!
//! A **mission** is one day's closed-loop route for one vehicle: the full
//! route polyline, its total distance, and the cumulative offsets at which
//! the planned sites fall.  Planning is fully deterministic given the
//! vehicle-day RNG; the planner itself holds no random state.
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`mission`] | `Mission`                                                 |
//! | [`planner`] | `plan_mission_route`, `plan_mission_from_waypoints`       |
//! | [`stops`]   | `Stop`, `StopKind`, `generate_mission_stops`              |

pub mod mission;
pub mod planner;
pub mod stops;

#[cfg(test)]
mod tests;

pub use mission::Mission;
pub use planner::{plan_mission_from_waypoints, plan_mission_route};
pub use stops::{generate_mission_stops, Stop, StopKind};
