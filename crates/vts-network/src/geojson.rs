//! GeoJSON road-geometry loader.
//!
//! Reads a FeatureCollection and feeds every `LineString` /
//! `MultiLineString` feature into a [`RoadNetworkBuilder`].  Point and
//! polygon features (localities, annotations) are silently skipped —
//! real-world zone files mix them in freely.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use vts_core::GeoPoint;

use crate::error::{NetworkError, NetworkResult};
use crate::network::{RoadNetwork, RoadNetworkBuilder};

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

/// GeoJSON positions are `[lon, lat, (alt)]`.
type Position = Vec<f64>;

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    #[serde(other)]
    Other,
}

/// Load a zone's road geometry into a pruned, routable [`RoadNetwork`].
///
/// # Errors
///
/// - [`NetworkError::GeoJson`] for malformed JSON;
/// - [`NetworkError::EmptyGraph`] when no routable line feature survives.
pub fn load_road_features(path: &Path) -> NetworkResult<RoadNetwork> {
    let file = File::open(path)?;
    let fc: FeatureCollection = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| NetworkError::GeoJson(format!("{}: {e}", path.display())))?;

    let mut builder = RoadNetworkBuilder::new();
    for feature in fc.features {
        match feature.geometry {
            Some(Geometry::LineString { coordinates }) => {
                builder.add_feature(&to_points(&coordinates));
            }
            Some(Geometry::MultiLineString { coordinates }) => {
                for part in &coordinates {
                    builder.add_feature(&to_points(part));
                }
            }
            _ => {}
        }
    }

    let network = builder.build();
    if network.is_empty() {
        return Err(NetworkError::EmptyGraph);
    }
    tracing::info!(
        path = %path.display(),
        nodes = network.node_count(),
        edges = network.edge_count(),
        "road graph ready"
    );
    Ok(network)
}

fn to_points(positions: &[Position]) -> Vec<GeoPoint> {
    positions
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| GeoPoint::new(p[1], p[0]))
        .collect()
}
