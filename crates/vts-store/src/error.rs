//! Error types for vts-store.

use thiserror::Error;

use vts_core::Date;

/// Errors that can occur while persisting or exporting telemetry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no telemetry partition for vehicle {vehicle_id} on {date}")]
    MissingPartition { vehicle_id: String, date: Date },
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
