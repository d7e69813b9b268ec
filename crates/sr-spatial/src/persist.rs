//! Graph file format and the load-boundary coercion of edge attributes.
//!
//! # Format
//!
//! A single JSON document:
//!
//! ```json
//! {
//!   "nodes": [ { "id": 261111, "lat": 41.8781, "lon": -87.6298 }, … ],
//!   "edges": [ { "u": 261111, "v": 261112, "length": 84.3,
//!                "safety_weight": 144.3, "highway": "residential" }, … ]
//! }
//! ```
//!
//! `u`/`v` reference node `id`s.  Floats are written in shortest round-trip
//! form and parsed with `serde_json`'s `float_roundtrip`, so a save/load cycle
//! reproduces every coordinate and weight bit-for-bit.
//!
//! # Coercion
//!
//! Graphs exported by other tools are loosely typed: `length` may be a
//! number, a numeric string, `null`, or missing.  [`parse_with_default`] is
//! applied exactly once per attribute while converting a [`GraphDocument`]
//! into a [`RoadNetwork`]; past that point every value is a finite,
//! non-negative `f64`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use sr_core::{GeoPoint, SafetyConfig};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::{SpatialError, SpatialResult};

// ── Document records ──────────────────────────────────────────────────────────

/// On-disk representation of an attributed road graph.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id:  i64,
    pub lat: f64,
    pub lon: f64,
}

/// Edge attributes are kept as raw JSON values until coercion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub u: i64,
    pub v: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_weight: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highway: Option<Value>,
}

// ── Coercion ──────────────────────────────────────────────────────────────────

/// Outcome of coercing one raw attribute.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Coerced {
    Parsed(f64),
    Defaulted(f64),
}

impl Coerced {
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Coerced::Parsed(v) | Coerced::Defaulted(v) => v,
        }
    }

    #[inline]
    pub fn was_defaulted(self) -> bool {
        matches!(self, Coerced::Defaulted(_))
    }
}

/// Parse a raw attribute as a finite non-negative number, or fall back to
/// `default`.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace ignored).
/// Missing, `null`, non-numeric, negative, and non-finite values all yield
/// `Coerced::Defaulted(default)`.
pub fn parse_with_default(raw: Option<&Value>, default: f64) -> Coerced {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed.filter(|v| v.is_finite() && *v >= 0.0) {
        Some(v) => Coerced::Parsed(v),
        None => Coerced::Defaulted(default),
    }
}

/// Road class from a `highway` attribute: a string, or the first string of a
/// list (OSM exports merge ways of several classes that way).
fn parse_highway<'a>(raw: Option<&'a Value>, default: &'a str) -> &'a str {
    match raw {
        Some(Value::String(s)) if !s.is_empty() => s.as_str(),
        Some(Value::Array(items)) => items
            .iter()
            .find_map(|v| v.as_str())
            .unwrap_or(default),
        _ => default,
    }
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Counters gathered while converting a document into a network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub nodes: usize,
    pub edges: usize,
    /// Edges whose `length` was missing or unparsable.
    pub defaulted_lengths: usize,
    /// Edges whose `safety_weight` was missing or unparsable.
    pub defaulted_safety_weights: usize,
}

impl GraphDocument {
    /// Convert into a typed [`RoadNetwork`], applying attribute defaults.
    ///
    /// # Errors
    ///
    /// [`SpatialError::DuplicateNodeKey`] for a repeated node id and
    /// [`SpatialError::UnknownNodeKey`] for an edge endpoint that is not in
    /// `nodes`.
    pub fn into_network(self, config: &SafetyConfig) -> SpatialResult<(RoadNetwork, LoadReport)> {
        let mut report = LoadReport {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            ..LoadReport::default()
        };
        let mut builder = RoadNetworkBuilder::with_capacity(self.nodes.len(), self.edges.len());

        for n in &self.nodes {
            builder.add_node(n.id, GeoPoint::new(n.lat, n.lon))?;
        }

        for e in &self.edges {
            let from = builder.node_by_key(e.u).ok_or(SpatialError::UnknownNodeKey(e.u))?;
            let to   = builder.node_by_key(e.v).ok_or(SpatialError::UnknownNodeKey(e.v))?;

            let length = parse_with_default(e.length.as_ref(), config.default_length_m);
            let safety = parse_with_default(
                e.safety_weight.as_ref(),
                config.default_safety_weight(length.value()),
            );
            report.defaulted_lengths += length.was_defaulted() as usize;
            report.defaulted_safety_weights += safety.was_defaulted() as usize;

            let highway = parse_highway(e.highway.as_ref(), &config.default_highway);
            builder.add_directed_edge(from, to, length.value(), safety.value(), highway);
        }

        Ok((builder.build(), report))
    }

    /// Snapshot a network into its on-disk form.  Edges are written in
    /// `EdgeId` order.
    pub fn from_network(network: &RoadNetwork) -> Self {
        let nodes = network
            .node_pos
            .iter()
            .zip(&network.node_key)
            .map(|(pos, &id)| NodeRecord { id, lat: pos.lat, lon: pos.lon })
            .collect();

        let edges = (0..network.edge_count())
            .map(|i| {
                let from = network.edge_from[i];
                let to   = network.edge_to[i];
                EdgeRecord {
                    u: network.node_key[from.index()],
                    v: network.node_key[to.index()],
                    length: Some(Value::from(network.edge_length_m[i])),
                    safety_weight: Some(Value::from(network.edge_safety_weight[i])),
                    highway: Some(Value::from(
                        network.highway_types[network.edge_highway[i] as usize].as_str(),
                    )),
                }
            })
            .collect();

        Self { nodes, edges }
    }
}

/// Read a graph document from any `Read` source and convert it.
pub fn read_graph<R: Read>(reader: R, config: &SafetyConfig) -> SpatialResult<(RoadNetwork, LoadReport)> {
    let doc: GraphDocument = serde_json::from_reader(reader)?;
    doc.into_network(config)
}

/// Load a graph file from disk.  Logs node/edge counts and how many
/// attributes fell back to defaults.
pub fn load_graph_file(path: &Path, config: &SafetyConfig) -> SpatialResult<(RoadNetwork, LoadReport)> {
    let file = File::open(path)?;
    let (network, report) = read_graph(BufReader::new(file), config)?;

    info!(
        "loaded graph {}: {} nodes, {} edges",
        path.display(),
        report.nodes,
        report.edges
    );
    if report.defaulted_lengths > 0 || report.defaulted_safety_weights > 0 {
        warn!(
            "{} edges had no usable length, {} no usable safety_weight; defaults applied",
            report.defaulted_lengths, report.defaulted_safety_weights
        );
    }
    Ok((network, report))
}

/// Write a network as a graph document.
pub fn write_graph<W: Write>(writer: W, network: &RoadNetwork) -> SpatialResult<()> {
    serde_json::to_writer(writer, &GraphDocument::from_network(network))?;
    Ok(())
}

/// Save a network to disk.
pub fn save_graph_file(path: &Path, network: &RoadNetwork) -> SpatialResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_graph(&mut out, network)?;
    out.flush()?;
    info!(
        "saved graph {}: {} nodes, {} edges",
        path.display(),
        network.node_count(),
        network.edge_count()
    );
    Ok(())
}
