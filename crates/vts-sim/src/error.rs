//! Error types for vts-sim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("fleet configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] vts_core::CoreError),

    #[error(transparent)]
    Network(#[from] vts_network::NetworkError),

    #[error(transparent)]
    Store(#[from] vts_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SimResult<T> = Result<T, SimError>;
