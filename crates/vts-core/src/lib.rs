//! `vts-core` — foundational types for the vts telemetry synthesizer.
//!
//! This crate is a dependency of every other `vts-*` crate.  It intentionally
//! has no `vts-*` dependencies and minimal external ones (`rand`, `serde`,
//! `thiserror`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`, `GeomId`                          |
//! | [`geo`]      | `GeoPoint`, planar degree→meter distance, bearing     |
//! | [`polyline`] | `Polyline` — interpolation, projection, lookahead     |
//! | [`time`]     | `Date`, `Timestamp`, `ShiftWindow`                    |
//! | [`rng`]      | `SeededRng`, `derive_seed` (per-vehicle/per-day)      |
//! | [`queue`]    | `Fifo<T>` — explicit pop-front queue                  |
//! | [`profile`]  | `VehicleProfile` — validated vehicle configuration    |
//! | [`error`]    | `CoreError`, `CoreResult`                             |

pub mod error;
pub mod geo;
pub mod ids;
pub mod polyline;
pub mod profile;
pub mod queue;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, DEG_TO_M, KNOTS_TO_MPS};
pub use ids::{EdgeId, GeomId, NodeId};
pub use polyline::Polyline;
pub use profile::VehicleProfile;
pub use queue::Fifo;
pub use rng::{derive_seed, SeededRng};
pub use time::{Date, ShiftWindow, Timestamp};
