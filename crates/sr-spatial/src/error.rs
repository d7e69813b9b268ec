//! Spatial-subsystem error type.

use thiserror::Error;

use sr_core::NodeId;

/// Errors produced by `sr-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("spatial index is empty")]
    EmptyIndex,

    /// Snapping a coordinate failed because the graph has no nodes.
    #[error("no node near ({lat}, {lon}): graph has no nodes")]
    NearestNodeNotFound { lat: f64, lon: f64 },

    #[error("coordinate ({lat}, {lon}) is not finite")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("no edge from {from} to {to}")]
    EdgeNotFound { from: NodeId, to: NodeId },

    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("graph not loaded")]
    GraphNotLoaded,

    #[error("duplicate node id {0} in graph")]
    DuplicateNodeKey(i64),

    #[error("edge references unknown node id {0}")]
    UnknownNodeKey(i64),

    #[error("expected {expected} safety weights, got {got}")]
    WeightCount { expected: usize, got: usize },

    #[error("graph file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
