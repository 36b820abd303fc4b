//! `vts-sim` — fleet configuration and the parallel batch driver.
//!
//! The batch driver fans a fleet out over Rayon's thread pool, one task per
//! vehicle.  Each task loads its zone's road network once, then walks the
//! configured date range day by day:
//!
//! ```text
//! for date in range:
//!   outside profile validity  → skip silently
//!   Sunday / holiday          → parked-day records at the depot
//!   otherwise                 → plan mission, tick a VehicleAgent through
//!                               the day, persist to the store
//! ```
//!
//! Failures are collected per vehicle-day into the [`BatchReport`]; one bad
//! day never aborts its siblings.
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`config`]   | `FleetConfig`, `ZoneConfig` — validated JSON config   |
//! | [`calendar`] | `OperationalCalendar` — Sundays and holidays          |
//! | [`feed`]     | `CheckpointFeed` — external fix feed (TSV)            |
//! | [`catalog`]  | `RouteCatalog` — predefined waypoint routes per zone  |
//! | [`batch`]    | `run_batch`, `BatchReport`                            |

pub mod batch;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;


pub use batch::{run_batch, BatchReport};
pub use calendar::OperationalCalendar;
pub use catalog::RouteCatalog;
pub use config::{FleetConfig, VehicleSource, ZoneConfig};
pub use error::{SimError, SimResult};
pub use feed::CheckpointFeed;
