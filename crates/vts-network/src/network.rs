//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays are sorted by source node and indexed by `EdgeId`.
//! Each undirected road segment contributes one edge in each direction; the
//! two directions share a single geometry entry in the pool, one of them
//! flagged as reversed.
//!
//! # Node merging
//!
//! Endpoint coordinates are quantized to 1e-5 degrees (~1 m) before lookup,
//! so near-duplicate endpoints in noisy source data collapse into a single
//! node instead of producing unroutable hairline gaps.
//!
//! # Connectivity invariant
//!
//! `build()` prunes the graph to its largest connected component.  Every
//! retained node is reachable from every retained node, so routing can only
//! fail between nodes that were never retained.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use vts_core::{EdgeId, GeoPoint, GeomId, NodeId, SeededRng};

/// Quantization factor: 1e-5 degrees ≈ 1.1 m.
const COORD_SCALE: f64 = 1e5;

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space, matching the planar
    /// metric used everywhere else.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Routable road graph in CSR format plus a spatial index for node snapping.
///
/// Do not construct directly; use [`RoadNetworkBuilder`].  Read-only after
/// construction — one network is built per vehicle and reused across its
/// whole date range.
pub struct RoadNetwork {
    /// Geographic position of each retained node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.  Length = nodes + 1.
    pub node_out_start: Vec<u32>,

    /// Source node of each edge.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// True (unperturbed) length of each edge in meters.
    pub edge_length_m: Vec<f64>,

    /// Geometry-pool entry for each edge.
    pub edge_geom: Vec<GeomId>,

    /// Whether the pooled geometry is stored in the opposite orientation to
    /// this edge's from→to direction.
    pub edge_reversed: Vec<bool>,

    /// Shared per-segment geometry pool.
    geoms: Vec<Vec<GeoPoint>>,

    /// How many nodes the component pruning removed.
    removed_nodes: usize,

    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Nodes dropped by largest-component pruning during `build()`.
    pub fn removed_node_count(&self) -> usize {
        self.removed_nodes
    }

    #[inline]
    pub fn node_pos(&self, node: NodeId) -> GeoPoint {
        self.node_pos[node.index()]
    }

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// The geometry of `edge` oriented from its source to its destination.
    pub fn edge_geometry(&self, edge: EdgeId) -> Vec<GeoPoint> {
        let geom = &self.geoms[self.edge_geom[edge.index()].index()];
        if self.edge_reversed[edge.index()] {
            geom.iter().rev().copied().collect()
        } else {
            geom.clone()
        }
    }

    /// Return the `NodeId` of the nearest node to `pos`, or `None` on an
    /// empty network.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// Uniformly random retained node, for mission-site sampling.
    pub fn random_node(&self, rng: &mut SeededRng) -> Option<NodeId> {
        if self.node_pos.is_empty() {
            return None;
        }
        Some(NodeId(rng.gen_range(0..self.node_pos.len() as u32)))
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally from line features, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use vts_core::GeoPoint;
/// use vts_network::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// b.add_feature(&[GeoPoint::new(12.95, 77.61), GeoPoint::new(12.96, 77.61)]);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes: Vec<GeoPoint>,
    node_index: FxHashMap<(i64, i64), NodeId>,
    geoms: Vec<Vec<GeoPoint>>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from: NodeId,
    to: NodeId,
    length_m: f64,
    geom: GeomId,
    reversed: bool,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_index: FxHashMap::default(),
            geoms: Vec::new(),
            raw_edges: Vec::new(),
        }
    }

    /// Quantized coordinate key for ~1 m node merging.
    fn quantize(p: GeoPoint) -> (i64, i64) {
        (
            (p.lat * COORD_SCALE).round() as i64,
            (p.lon * COORD_SCALE).round() as i64,
        )
    }

    /// Node handle for `p`, creating one if this (rounded) coordinate is new.
    fn node_for(&mut self, p: GeoPoint) -> NodeId {
        let key = Self::quantize(p);
        *self.node_index.entry(key).or_insert_with(|| {
            let id = NodeId(self.nodes.len() as u32);
            self.nodes.push(GeoPoint::new(
                key.0 as f64 / COORD_SCALE,
                key.1 as f64 / COORD_SCALE,
            ));
            id
        })
    }

    /// Add one road segment (a line feature's coordinate sequence).
    ///
    /// Contributes a directed edge in each direction, sharing one pooled
    /// geometry entry.  Features with fewer than two points, or whose
    /// endpoints merge into the same node after quantization, are ignored.
    ///
    /// Returns `true` if the feature produced edges.
    pub fn add_feature(&mut self, coords: &[GeoPoint]) -> bool {
        if coords.len() < 2 {
            return false;
        }
        let length_m: f64 = coords
            .windows(2)
            .map(|w| w[0].planar_distance_m(w[1]))
            .sum();

        let from = self.node_for(coords[0]);
        let to = self.node_for(*coords.last().unwrap());
        if from == to {
            // Degenerate after merging (or a closed ring) — no routing value.
            return false;
        }

        let geom = GeomId(self.geoms.len() as u32);
        self.geoms.push(coords.to_vec());

        self.raw_edges.push(RawEdge { from, to, length_m, geom, reversed: false });
        self.raw_edges.push(RawEdge { from: to, to: from, length_m, geom, reversed: true });
        true
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Consume the builder: prune to the largest connected component, remap
    /// node IDs to a dense range, build the CSR arrays and the R-tree.
    pub fn build(self) -> RoadNetwork {
        let total_nodes = self.nodes.len();

        // ── Largest connected component via union-find ────────────────────
        let mut uf = UnionFind::new(total_nodes);
        for e in &self.raw_edges {
            uf.union(e.from.index(), e.to.index());
        }
        let keep_root = largest_component_root(&mut uf, total_nodes);

        // Dense remap of kept nodes.
        let mut remap = vec![NodeId::INVALID; total_nodes];
        let mut node_pos = Vec::new();
        for (i, &pos) in self.nodes.iter().enumerate() {
            if Some(uf.find(i)) == keep_root {
                remap[i] = NodeId(node_pos.len() as u32);
                node_pos.push(pos);
            }
        }
        let removed_nodes = total_nodes - node_pos.len();
        if removed_nodes > 0 {
            tracing::info!(
                kept = node_pos.len(),
                removed = removed_nodes,
                "pruned road graph to largest connected component"
            );
        }

        // ── CSR construction over surviving edges ─────────────────────────
        let mut raw: Vec<RawEdge> = self
            .raw_edges
            .into_iter()
            .filter(|e| remap[e.from.index()] != NodeId::INVALID)
            .map(|e| RawEdge {
                from: remap[e.from.index()],
                to: remap[e.to.index()],
                ..e
            })
            .collect();
        raw.sort_unstable_by_key(|e| e.from.0);

        let node_count = node_pos.len();
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        let edge_from: Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to: Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64> = raw.iter().map(|e| e.length_m).collect();
        let edge_geom: Vec<GeomId> = raw.iter().map(|e| e.geom).collect();
        let edge_reversed: Vec<bool> = raw.iter().map(|e| e.reversed).collect();

        // Bulk-load the R-tree (faster than N inserts).
        let entries: Vec<NodeEntry> = node_pos
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lon],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_geom,
            edge_reversed,
            geoms: self.geoms,
            removed_nodes,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ── Union-find ────────────────────────────────────────────────────────────────

struct UnionFind {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] as usize != root {
            root = self.parent[root] as usize;
        }
        // Path compression.
        let mut cur = x;
        while cur != root {
            let next = self.parent[cur] as usize;
            self.parent[cur] = root as u32;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra as u32;
        self.size[ra] += self.size[rb];
    }
}

/// Root of the largest component, or `None` for an empty graph.
fn largest_component_root(uf: &mut UnionFind, n: usize) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for i in 0..n {
        let root = uf.find(i);
        let size = uf.size[root];
        if best.map_or(true, |(_, s)| size > s) {
            best = Some((root, size));
        }
    }
    best.map(|(root, _)| root)
}
