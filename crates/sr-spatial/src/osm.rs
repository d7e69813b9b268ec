//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use sr_spatial::osm::load_from_pbf;
//!
//! let network = load_from_pbf(Path::new("chicago.osm.pbf"), &SafetyConfig::default())?;
//! ```
//!
//! # What is loaded
//!
//! Only drivable `highway=*` ways are included (the `drive` network type).
//! All other features (footways, buildings, POIs, relations) are ignored.
//! One-way roads add a single directed edge; two-way roads add both directions.
//! Each edge keeps its way's `highway` value and a haversine length; its
//! safety weight starts at the configured default (`length × multiplier`)
//! until the weight builder overwrites it.  Node keys are OSM node ids.
//!
//! # Memory note
//!
//! The loader buffers all OSM nodes in a `HashMap<i64, GeoPoint>` for the
//! first pass (needed because ways reference node IDs by OSM integer ID).
//! For Chicago this is a few million entries; the map is freed before edges
//! are added.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use osmpbf::{Element, ElementReader};

use sr_core::{GeoPoint, SafetyConfig};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::SpatialError;

// ── Public entry point ────────────────────────────────────────────────────────

/// Load a road network from an OSM PBF file.
///
/// Only car-drivable roads are included.  Use [`RoadNetworkBuilder`]
/// directly, or a graph file, for non-OSM sources.
///
/// # Errors
///
/// Returns [`SpatialError::Osm`] when the file cannot be opened or parsed.
pub fn load_from_pbf(path: &Path, config: &SafetyConfig) -> Result<RoadNetwork, SpatialError> {
    // ── Phase 1: collect all OSM nodes + road ways in one sequential pass ──
    let reader = ElementReader::from_path(path).map_err(|e| SpatialError::Osm(e.to_string()))?;

    let mut all_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(
                    n.id(),
                    GeoPoint::new(n.lat(), n.lon()),
                );
            }
            Element::DenseNode(n) => {
                all_nodes.insert(
                    n.id(),
                    GeoPoint::new(n.lat(), n.lon()),
                );
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let highway = tags
                    .iter()
                    .find(|(k, _)| *k == "highway")
                    .map(|(_, v)| *v);

                if let Some(highway) = highway.filter(|h| is_drivable(h)) {
                    let oneway = is_oneway(highway, &tags);
                    let refs: Vec<i64> = w.refs().collect();
                    road_ways.push(OsmWay { refs, highway: highway.to_owned(), oneway });
                }
            }
            _ => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    // ── Phase 2: identify road-referenced node IDs ────────────────────────
    let road_node_ids: HashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .collect();

    // ── Phase 3: build network ────────────────────────────────────────────
    // Pre-allocate: ~2× road nodes for edges (rough estimate).
    let mut builder = RoadNetworkBuilder::with_capacity(
        road_node_ids.len(),
        road_node_ids.len() * 2,
    );

    // Sorted so NodeIds (and hence snapping ties) are stable across runs.
    let mut road_node_ids: Vec<i64> = road_node_ids.into_iter().collect();
    road_node_ids.sort_unstable();

    for &osm_id in &road_node_ids {
        if let Some(&pos) = all_nodes.get(&osm_id) {
            builder.add_node(osm_id, pos)?;
        }
    }

    // Free the full node map.
    drop(all_nodes);
    drop(road_node_ids);

    // Add directed edges from way node sequences.
    for way in &road_ways {
        for window in way.refs.windows(2) {
            let (osm_a, osm_b) = (window[0], window[1]);
            if let (Some(from), Some(to)) =
                (builder.node_by_key(osm_a), builder.node_by_key(osm_b))
            {
                let len_m = builder.node_pos(from).distance_m(builder.node_pos(to));
                let safety = config.default_safety_weight(len_m);

                builder.add_directed_edge(from, to, len_m, safety, &way.highway);
                if !way.oneway {
                    builder.add_directed_edge(to, from, len_m, safety, &way.highway);
                }
            }
        }
    }

    Ok(builder.build())
}

// ── Internal types ────────────────────────────────────────────────────────────

struct OsmWay {
    refs:    Vec<i64>,
    highway: String,
    oneway:  bool,
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// `true` if a `highway` value is drivable by car (the `drive` network type).
fn is_drivable(highway: &str) -> bool {
    !matches!(
        highway,
        "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "track"
            | "bridleway" | "corridor" | "elevator" | "escalator" | "proposed"
            | "construction" | "abandoned" | "platform" | "raceway" | "bus_guideway"
    )
}

/// Determine whether a way should be treated as one-way for car traffic.
///
/// Motorways and motorway links are implicitly one-way in OSM convention.
fn is_oneway(highway: &str, tags: &[(&str, &str)]) -> bool {
    let explicit = tags.iter().any(|(k, v)| {
        *k == "oneway" && matches!(*v, "yes" | "1" | "true")
    });
    let implicit = matches!(highway, "motorway" | "motorway_link");
    explicit || implicit
}
