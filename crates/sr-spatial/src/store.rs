//! Runtime owner of the annotated road network.
//!
//! A `GraphStore` is constructed explicitly and handed to whoever serves
//! queries; there is no global graph.  Once loaded it is never mutated by
//! queries, so `&GraphStore` (or `Arc<GraphStore>`) can be shared across
//! threads without locking.  Replacing the graph goes through
//! [`GraphStore::reload`], which needs `&mut self`.
//!
//! Until a load succeeds every accessor fails with
//! [`SpatialError::GraphNotLoaded`].

use std::path::Path;

use log::{debug, info, warn};

use sr_core::{GeoPoint, NodeId, SafetyConfig};

use crate::index::SpatialIndex;
use crate::network::RoadNetwork;
use crate::persist::{load_graph_file, LoadReport};
use crate::{SpatialError, SpatialResult};

/// Attributes of the edge selected for a node pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeAttributes<'a> {
    pub length: f64,
    pub safety_weight: f64,
    pub highway_type: &'a str,
}

struct LoadedGraph {
    network: RoadNetwork,
    index:   SpatialIndex<NodeId>,
}

impl LoadedGraph {
    fn new(network: RoadNetwork) -> Self {
        let index = SpatialIndex::build(
            network
                .node_pos
                .iter()
                .enumerate()
                .map(|(i, p)| (NodeId(i as u32), p.lat, p.lon)),
        );
        Self { network, index }
    }
}

/// Immutable road network plus nearest-node index, with a load lifecycle.
pub struct GraphStore {
    config: SafetyConfig,
    graph:  Option<LoadedGraph>,
}

impl GraphStore {
    /// A store with no graph.  Every query fails with `GraphNotLoaded`.
    pub fn unloaded(config: SafetyConfig) -> Self {
        Self { config, graph: None }
    }

    /// Wrap an in-memory network (already typed; no coercion applied).
    pub fn from_network(network: RoadNetwork, config: SafetyConfig) -> Self {
        Self { config, graph: Some(LoadedGraph::new(network)) }
    }

    /// Load a graph file and build the spatial index over its nodes.
    pub fn open(path: &Path, config: SafetyConfig) -> SpatialResult<Self> {
        let mut store = Self::unloaded(config);
        store.reload(path)?;
        Ok(store)
    }

    /// Replace the current graph with the one at `path`.
    ///
    /// On failure the previously loaded graph (if any) stays in service.
    pub fn reload(&mut self, path: &Path) -> SpatialResult<LoadReport> {
        match load_graph_file(path, &self.config) {
            Ok((network, report)) => {
                self.graph = Some(LoadedGraph::new(network));
                info!("graph store ready: {} nodes indexed", report.nodes);
                Ok(report)
            }
            Err(e) => {
                warn!(
                    "failed to load {}: {e}; keeping {} graph",
                    path.display(),
                    if self.graph.is_some() { "previous" } else { "no" }
                );
                Err(e)
            }
        }
    }

    /// `false` until a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.graph.is_some()
    }

    fn loaded(&self) -> SpatialResult<&LoadedGraph> {
        self.graph.as_ref().ok_or(SpatialError::GraphNotLoaded)
    }

    /// The loaded network.
    pub fn network(&self) -> SpatialResult<&RoadNetwork> {
        Ok(&self.loaded()?.network)
    }

    /// Snap `(lat, lon)` to the nearest graph node (planar distance).
    ///
    /// # Errors
    ///
    /// `GraphNotLoaded`, `InvalidCoordinate` for a NaN or infinite input, or
    /// `NearestNodeNotFound` when the graph has no nodes.
    pub fn nearest_node(&self, lat: f64, lon: f64) -> SpatialResult<NodeId> {
        let graph = self.loaded()?;
        match graph.index.query(lat, lon) {
            Ok((node, dist)) => {
                debug!("snapped ({lat}, {lon}) to {node} at {dist:.6} deg");
                Ok(node)
            }
            Err(SpatialError::EmptyIndex) => Err(SpatialError::NearestNodeNotFound { lat, lon }),
            Err(e) => Err(e),
        }
    }

    /// Position of `node`.
    pub fn node_position(&self, node: NodeId) -> SpatialResult<GeoPoint> {
        self.loaded()?.network.position(node)
    }

    /// Attributes of the edge `u → v`; the minimum-length one when parallel
    /// edges exist.
    pub fn edge_attributes(&self, u: NodeId, v: NodeId) -> SpatialResult<EdgeAttributes<'_>> {
        let net = &self.loaded()?.network;
        let edge = net
            .edge_between(u, v)
            .ok_or(SpatialError::EdgeNotFound { from: u, to: v })?;
        Ok(EdgeAttributes {
            length: net.edge_length_m[edge.index()],
            safety_weight: net.edge_safety_weight[edge.index()],
            highway_type: net.highway(edge),
        })
    }
}
