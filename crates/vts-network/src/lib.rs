//! `vts-network` — road network, spatial indexing, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`         |
//! | [`router`]  | `RoutePath`, stochastic-weight Dijkstra                    |
//! | [`geojson`] | GeoJSON line-feature loader                                |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                         |

pub mod error;
pub mod geojson;
pub mod network;
pub mod router;


pub use error::{NetworkError, NetworkResult};
pub use geojson::load_road_features;
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use router::RoutePath;
