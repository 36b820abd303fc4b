//! `vts-store` — on-disk telemetry persistence.
//!
//! Records land in date-partitioned CSV files under the store's base
//! directory:
//!
//! ```text
//! <base>/telemetry/year=2023/month=03/350000000000001_2023-03-06.csv
//! ```
//!
//! Writing into an existing partition is an idempotent upsert: rows merge by
//! timestamp and a rewritten row replaces the old one.  [`export`] renders a
//! partition into the fixed-format tracker text log consumed downstream.

pub mod error;
pub mod export;
pub mod parked;
pub mod store;


pub use error::{StoreError, StoreResult};
pub use parked::parked_day_records;
pub use store::TelemetryStore;
