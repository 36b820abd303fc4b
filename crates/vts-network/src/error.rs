//! Network-subsystem error type.

use thiserror::Error;

/// Errors produced by `vts-network`.
///
/// Note that an unreachable destination is *not* an error: `shortest_path`
/// returns `None` for that case, because disconnected waypoint draws are an
/// expected part of mission planning.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("road geometry has no routable features")]
    EmptyGraph,

    #[error("GeoJSON parse error: {0}")]
    GeoJson(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
