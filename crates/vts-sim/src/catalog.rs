//! Predefined route catalog.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use vts_core::GeoPoint;

use crate::error::SimResult;

/// One predefined route: an ordered waypoint list under a stable id.
#[derive(Clone, Debug, Deserialize)]
pub struct PredefinedRoute {
    pub id: String,
    pub waypoints: Vec<GeoPoint>,
}

/// Zone → predefined routes, loaded from a JSON map.
#[derive(Debug, Default)]
pub struct RouteCatalog {
    routes: FxHashMap<String, Vec<PredefinedRoute>>,
}

impl RouteCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> SimResult<Self> {
        let text = fs::read_to_string(path)?;
        let routes: FxHashMap<String, Vec<PredefinedRoute>> = serde_json::from_str(&text)?;
        Ok(Self { routes })
    }

    /// Routes available for a zone; empty when the zone has none.
    pub fn routes_for(&self, zone_id: &str) -> &[PredefinedRoute] {
        self.routes.get(zone_id).map(Vec::as_slice).unwrap_or_default()
    }
}
