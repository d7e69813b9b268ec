//! Routing trait and default Dijkstra implementation.
//!
//! # Cost functions
//!
//! A search minimises one edge attribute, selected by [`CostKind`]:
//! physical `length` for the shortest route, `safety_weight` for the safer
//! one.  Both attributes are non-negative (guaranteed at the load boundary),
//! which is all Dijkstra needs.
//!
//! # Determinism
//!
//! Heap entries are ordered by `(cost, NodeId)` and relaxation only replaces
//! a predecessor on a strictly smaller cost, so equal-cost alternatives always
//! resolve the same way for the same graph.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use sr_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── CostKind ──────────────────────────────────────────────────────────────────

/// Which edge attribute a search minimises.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CostKind {
    /// `edge_length_m`: the shortest ("risky") route.
    Length,
    /// `edge_safety_weight`: the safer route.
    SafetyWeight,
}

impl CostKind {
    #[inline]
    pub fn edge_cost(self, network: &RoadNetwork, edge: EdgeId) -> f64 {
        match self {
            CostKind::Length       => network.edge_length_m[edge.index()],
            CostKind::SafetyWeight => network.edge_safety_weight[edge.index()],
        }
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes visited in order, origin and destination included.
    pub nodes: Vec<NodeId>,
    /// Edges traversed in order; `edges.len() == nodes.len() - 1`.
    pub edges: Vec<EdgeId>,
    /// Sum of the minimised attribute along the route.
    pub total_cost: f64,
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// Implementations must be `Send + Sync`: a single router is shared by all
/// concurrent queries.
pub trait Router: Send + Sync {
    /// Minimum-cost route from `from` to `to` under `cost`.
    ///
    /// `from == to` yields the single-node route with zero cost.  A missing
    /// path is [`SpatialError::NoRoute`].
    fn route(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        to: NodeId,
        cost: CostKind,
    ) -> SpatialResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR road graph.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        to: NodeId,
        cost: CostKind,
    ) -> SpatialResult<Route> {
        dijkstra(network, from, to, cost)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Total order over non-negative `f64` costs for use in a `BinaryHeap`.
#[derive(Copy, Clone, Debug)]
struct Cost(f64);

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(
    network: &RoadNetwork,
    from: NodeId,
    to: NodeId,
    cost_kind: CostKind,
) -> SpatialResult<Route> {
    let n = network.node_count();
    for node in [from, to] {
        if node.index() >= n {
            return Err(SpatialError::NodeNotFound(node));
        }
    }

    if from == to {
        return Ok(Route { nodes: vec![from], edges: vec![], total_cost: 0.0 });
    }

    // dist[v] = best known cost to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost + cost_kind.edge_cost(network, edge);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(
    network: &RoadNetwork,
    prev_edge: &[EdgeId],
    from: NodeId,
    to: NodeId,
    total_cost: f64,
) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        edges.push(e);
        cur = network.edge_from[e.index()];
    }
    edges.reverse();

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(from);
    nodes.extend(edges.iter().map(|e| network.edge_to[e.index()]));

    Route { nodes, edges, total_cost }
}
