//! `vts-agent` — the per-vehicle simulation state machine.
//!
//! A [`VehicleAgent`] advances one simulated day in fixed 1-second ticks,
//! running the OFF_SHIFT / DRIVING / DWELLING / ROUTE_FINISHED state machine
//! over a planned [`Mission`](vts_mission::Mission) and buffering
//! [`TelemetryRecord`]s for the store.
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`agent`]     | `VehicleAgent`, `AgentState`, tick loop internals       |
//! | [`telemetry`] | `TelemetryRecord`                                       |
//! | [`checkpoint`]| `Checkpoint` — externally forced fixes                  |

pub mod agent;
pub mod checkpoint;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use agent::{AgentState, VehicleAgent};
pub use checkpoint::Checkpoint;
pub use telemetry::TelemetryRecord;
