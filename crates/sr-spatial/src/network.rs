//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`,
//! `edge_safety_weight`, `edge_highway`) are sorted by source node and
//! indexed by `EdgeId`.  The sort is stable, so parallel edges between the
//! same pair keep their insertion order; that order is the final tie-breaker
//! when selecting among parallel edges.
//!
//! # Node identity
//!
//! Nodes are addressed internally by dense `NodeId`s.  Each node also carries
//! a stable external key (`node_key`, typically the OSM node id) which is
//! what gets persisted and what graph files use to reference edge endpoints.

use rustc_hash::FxHashMap;

use sr_core::{EdgeId, GeoPoint, NodeId};

use crate::{SpatialError, SpatialResult};

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format with per-edge length, safety weight, and
/// road class.
///
/// All array fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadNetworkBuilder`].
#[derive(Debug)]
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Stable external identifier of each node.  Indexed by `NodeId`.
    pub node_key: Vec<i64>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Physical length of each edge in metres.
    pub edge_length_m: Vec<f64>,

    /// Safety-weighted cost of each edge: `length + crime penalty`.
    pub edge_safety_weight: Vec<f64>,

    /// Index into [`highway_types`](Self::highway_types) for each edge.
    pub edge_highway: Vec<u32>,

    /// Interned road-class names (`"residential"`, `"primary"`, …).
    pub highway_types: Vec<String>,

    key_to_node: FxHashMap<i64, NodeId>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Node lookup ───────────────────────────────────────────────────────

    /// Position of `node`, or `NodeNotFound` for an out-of-range id.
    pub fn position(&self, node: NodeId) -> SpatialResult<GeoPoint> {
        self.node_pos
            .get(node.index())
            .copied()
            .ok_or(SpatialError::NodeNotFound(node))
    }

    /// Resolve an external node key to its `NodeId`.
    pub fn node_by_key(&self, key: i64) -> Option<NodeId> {
        self.key_to_node.get(&key).copied()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// The edge `from → to` with the smallest `length`.
    ///
    /// Parallel edges of equal length resolve to the one inserted first.
    /// Returns `None` if no such edge exists or either id is out of range.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        if from.index() >= self.node_count() {
            return None;
        }
        let mut best: Option<EdgeId> = None;
        for e in self.out_edges(from) {
            if self.edge_to[e.index()] != to {
                continue;
            }
            match best {
                Some(b) if self.edge_length_m[b.index()] <= self.edge_length_m[e.index()] => {}
                _ => best = Some(e),
            }
        }
        best
    }

    /// Road class name of `edge`.
    #[inline]
    pub fn highway(&self, edge: EdgeId) -> &str {
        &self.highway_types[self.edge_highway[edge.index()] as usize]
    }

    // ── Weight annotation ─────────────────────────────────────────────────

    /// Replace every edge's safety weight.  `weights` is indexed by `EdgeId`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::WeightCount`] if `weights.len() != edge_count()`.
    pub fn set_safety_weights(&mut self, weights: Vec<f64>) -> SpatialResult<()> {
        if weights.len() != self.edge_count() {
            return Err(SpatialError::WeightCount {
                expected: self.edge_count(),
                got: weights.len(),
            });
        }
        self.edge_safety_weight = weights;
        Ok(())
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use sr_core::GeoPoint;
/// use sr_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(1001, GeoPoint::new(41.88, -87.63)).unwrap();
/// let c = b.add_node(1002, GeoPoint::new(41.89, -87.63)).unwrap();
/// b.add_road(a, c, 1_100.0, 1_100.0, "residential");
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:       Vec<GeoPoint>,
    keys:        Vec<i64>,
    key_to_node: FxHashMap<i64, NodeId>,
    raw_edges:   Vec<RawEdge>,
    highways:    Vec<String>,
    highway_ids: FxHashMap<String, u32>,
}

struct RawEdge {
    from:          NodeId,
    to:            NodeId,
    length_m:      f64,
    safety_weight: f64,
    highway:       u32,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:       Vec::with_capacity(nodes),
            keys:        Vec::with_capacity(nodes),
            key_to_node: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            raw_edges:   Vec::with_capacity(edges),
            highways:    Vec::new(),
            highway_ids: FxHashMap::default(),
        }
    }

    /// Add a road node with external key `key` and return its `NodeId`
    /// (sequential from 0).
    ///
    /// # Errors
    ///
    /// [`SpatialError::DuplicateNodeKey`] if `key` was already added.
    pub fn add_node(&mut self, key: i64, pos: GeoPoint) -> SpatialResult<NodeId> {
        if self.key_to_node.contains_key(&key) {
            return Err(SpatialError::DuplicateNodeKey(key));
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.keys.push(key);
        self.key_to_node.insert(key, id);
        Ok(id)
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        length_m: f64,
        safety_weight: f64,
        highway: &str,
    ) {
        let highway = self.intern_highway(highway);
        self.raw_edges.push(RawEdge { from, to, length_m, safety_weight, highway });
    }

    /// Convenience: add edges in **both directions** for a two-way street.
    pub fn add_road(
        &mut self,
        a: NodeId,
        b: NodeId,
        length_m: f64,
        safety_weight: f64,
        highway: &str,
    ) {
        self.add_directed_edge(a, b, length_m, safety_weight, highway);
        self.add_directed_edge(b, a, length_m, safety_weight, highway);
    }

    /// Look up a node added earlier by its external key.
    pub fn node_by_key(&self, key: i64) -> Option<NodeId> {
        self.key_to_node.get(&key).copied()
    }

    /// Position of a node added earlier (used by the OSM loader to compute
    /// edge lengths between adjacent way nodes).
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    fn intern_highway(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.highway_ids.get(name) {
            return id;
        }
        let id = self.highways.len() as u32;
        self.highways.push(name.to_owned());
        self.highway_ids.insert(name.to_owned(), id);
        id
    }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Time complexity: O(E log E) for the edge sort.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable sort keeps parallel edges in insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:          Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:            Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m:      Vec<f64>    = raw.iter().map(|e| e.length_m).collect();
        let edge_safety_weight: Vec<f64>    = raw.iter().map(|e| e.safety_weight).collect();
        let edge_highway:       Vec<u32>    = raw.iter().map(|e| e.highway).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        RoadNetwork {
            node_pos: self.nodes,
            node_key: self.keys,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_safety_weight,
            edge_highway,
            highway_types: self.highways,
            key_to_node: self.key_to_node,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
