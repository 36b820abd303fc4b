//! Shortest-path routing with optional stochastic edge weighting.
//!
//! # Route diversity
//!
//! When the caller supplies an RNG, every edge's Dijkstra cost is scaled by
//! an independent uniform multiplier in `[0.95, 1.05]` drawn for that call
//! only.  Near-tied alternatives then win or lose per draw, so the same
//! topology yields different (but seed-reproducible) routes across days and
//! vehicles.  The *reported* distance always uses the true weights — the
//! perturbation shapes choice, never the odometer.
//!
//! # Cost units
//!
//! Heap costs are integer millimeters (`u64`), keeping the heap `Ord` exact
//! and the `(cost, NodeId)` tie-break deterministic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use vts_core::{EdgeId, GeoPoint, NodeId, SeededRng};

use crate::network::RoadNetwork;

/// Uniform perturbation bounds for stochastic weighting.
const WEIGHT_JITTER: std::ops::Range<f64> = 0.95..1.05;

// ── RoutePath ────────────────────────────────────────────────────────────────

/// The result of a routing query: stitched route geometry plus the true
/// (unperturbed) distance.
#[derive(Debug, Clone)]
pub struct RoutePath {
    /// Route polyline from source to destination, junction duplicates removed.
    pub points: Vec<GeoPoint>,
    /// Total length in meters over true edge weights.
    pub distance_m: f64,
}

impl RoutePath {
    /// `true` if source and destination were the same node.
    pub fn is_trivial(&self) -> bool {
        self.points.len() <= 1
    }
}

// ── Dijkstra ─────────────────────────────────────────────────────────────────

impl RoadNetwork {
    /// Shortest path from `from` to `to` over edge weights.
    ///
    /// With `rng`, edge costs are independently perturbed for this call (see
    /// module docs).  Returns `None` when no path exists — an expected
    /// outcome during mission planning, not an error.
    pub fn shortest_path(
        &self,
        from: NodeId,
        to: NodeId,
        rng: Option<&mut SeededRng>,
    ) -> Option<RoutePath> {
        if from == to {
            return Some(RoutePath {
                points: vec![self.node_pos(from)],
                distance_m: 0.0,
            });
        }

        // Per-call multipliers, one independent draw per edge.  Drawn up
        // front so the consumed RNG stream depends only on the graph, not on
        // traversal order.
        let multipliers: Option<Vec<f64>> = rng.map(|r| {
            (0..self.edge_count())
                .map(|_| r.gen_range(WEIGHT_JITTER))
                .collect()
        });
        let cost_mm = |edge: EdgeId| -> u64 {
            let len = self.edge_length_m[edge.index()];
            let mult = multipliers.as_ref().map_or(1.0, |m| m[edge.index()]);
            (len * mult * 1000.0).round() as u64
        };

        let n = self.node_count();
        let mut dist = vec![u64::MAX; n];
        let mut prev_edge = vec![EdgeId::INVALID; n];
        dist[from.index()] = 0;

        // Min-heap: Reverse makes BinaryHeap (max) behave as min-heap.
        // Secondary key NodeId gives deterministic tie-breaking.
        let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
        heap.push(Reverse((0, from)));

        while let Some(Reverse((cost, node))) = heap.pop() {
            if node == to {
                return Some(self.reconstruct(&prev_edge, to));
            }
            // Skip stale heap entries.
            if cost > dist[node.index()] {
                continue;
            }
            for edge in self.out_edges(node) {
                let neighbor = self.edge_to[edge.index()];
                let new_cost = cost.saturating_add(cost_mm(edge));
                if new_cost < dist[neighbor.index()] {
                    dist[neighbor.index()] = new_cost;
                    prev_edge[neighbor.index()] = edge;
                    heap.push(Reverse((new_cost, neighbor)));
                }
            }
        }

        None
    }

    /// Stitch the edge geometries along `prev_edge` back-pointers into one
    /// polyline, reversing opposite-orientation geometry and dropping the
    /// duplicated junction coordinate between consecutive edges.
    fn reconstruct(&self, prev_edge: &[EdgeId], to: NodeId) -> RoutePath {
        let mut edges = Vec::new();
        let mut cur = to;
        loop {
            let e = prev_edge[cur.index()];
            if e == EdgeId::INVALID {
                break;
            }
            edges.push(e);
            cur = self.edge_from[e.index()];
        }
        edges.reverse();

        let mut points: Vec<GeoPoint> = Vec::new();
        let mut distance_m = 0.0;
        for &e in &edges {
            distance_m += self.edge_length_m[e.index()];
            let geom = self.edge_geometry(e);
            let skip = usize::from(!points.is_empty());
            points.extend(geom.into_iter().skip(skip));
        }
        RoutePath { points, distance_m }
    }
}
