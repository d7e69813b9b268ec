//! Crime-to-edge safety weight synthesis.
//!
//! # Algorithm
//!
//! 1. Bulk-load a [`SpatialIndex`] over every node coordinate.
//! 2. Snap each incident to its nearest node and count incidents per node
//!    ([`CrimeMap`]).
//! 3. For every edge `(u, v)`:
//!
//!    ```text
//!    safety_weight = length + (crimes[u] + crimes[v]) × penalty_factor
//!    ```
//!
//! The penalty sums both endpoints rather than averaging them, so a street
//! touching either of two high-crime intersections is penalised.  Because the
//! penalty is non-negative, `safety_weight ≥ length` on every edge.
//!
//! Snapping is the only expensive step; with the `parallel` feature it runs
//! on the rayon pool.  Counting stays sequential, so results are identical
//! either way.

use std::path::Path;

use log::{info, warn};
use rustc_hash::FxHashMap;

use sr_core::{NodeId, SafetyConfig};
use sr_spatial::{load_graph_file, save_graph_file, RoadNetwork, SpatialIndex};

use crate::crime::{load_incidents_csv, CrimeIncident};
use crate::WeightResult;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// ── CrimeMap ──────────────────────────────────────────────────────────────────

/// Incident count per node.  Nodes with no incidents are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrimeMap {
    counts: FxHashMap<NodeId, u32>,
}

impl CrimeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Incidents assigned to `node` (0 if none).
    #[inline]
    pub fn get(&self, node: NodeId) -> u32 {
        self.counts.get(&node).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, node: NodeId) {
        *self.counts.entry(node).or_insert(0) += 1;
    }

    /// Number of nodes with at least one incident.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The highest per-node count (0 for an empty map).
    pub fn max(&self) -> u32 {
        self.counts.values().copied().max().unwrap_or(0)
    }
}

// ── BuildReport ───────────────────────────────────────────────────────────────

/// Summary of one weight build.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuildReport {
    /// Incidents snapped to a node.
    pub incidents_assigned: usize,
    /// Incidents dropped (non-finite coordinates, or no nodes to snap to).
    pub incidents_skipped: usize,
    /// Nodes with at least one incident.
    pub nodes_with_crime: usize,
    /// Highest incident count at a single node.
    pub max_node_crimes: u32,
    /// Edges whose weight was raised above their length.
    pub penalised_edges: usize,
}

// ── WeightBuilder ─────────────────────────────────────────────────────────────

/// Derives `safety_weight` for every edge of a road network from crime
/// incidents.
#[derive(Debug, Clone, Default)]
pub struct WeightBuilder {
    config: SafetyConfig,
}

impl WeightBuilder {
    pub fn new(config: SafetyConfig) -> Self {
        Self { config }
    }

    /// Snap every incident to its nearest node and count per node.
    ///
    /// Returns the map and the number of skipped incidents.
    pub fn crime_map(&self, network: &RoadNetwork, incidents: &[CrimeIncident]) -> (CrimeMap, usize) {
        let mut map = CrimeMap::new();
        if network.is_empty() {
            return (map, incidents.len());
        }

        let index = SpatialIndex::build(
            network
                .node_pos
                .iter()
                .enumerate()
                .map(|(i, p)| (NodeId(i as u32), p.lat, p.lon)),
        );

        let snap = |inc: &CrimeIncident| -> Option<NodeId> {
            if !inc.pos.is_finite() {
                return None;
            }
            index.query(inc.pos.lat, inc.pos.lon).ok().map(|(node, _)| node)
        };

        #[cfg(feature = "parallel")]
        let snapped: Vec<Option<NodeId>> = incidents.par_iter().map(snap).collect();
        #[cfg(not(feature = "parallel"))]
        let snapped: Vec<Option<NodeId>> = incidents.iter().map(snap).collect();

        let mut skipped = 0;
        for node in snapped {
            match node {
                Some(n) => map.increment(n),
                None => skipped += 1,
            }
        }
        (map, skipped)
    }

    /// Safety weight of every edge, indexed by `EdgeId`.
    pub fn safety_weights(&self, network: &RoadNetwork, crimes: &CrimeMap) -> Vec<f64> {
        (0..network.edge_count())
            .map(|i| {
                let total = crimes.get(network.edge_from[i]) + crimes.get(network.edge_to[i]);
                network.edge_length_m[i] + total as f64 * self.config.penalty_factor
            })
            .collect()
    }

    /// Overwrite `network`'s safety weights from `incidents`.
    pub fn annotate(
        &self,
        network: &mut RoadNetwork,
        incidents: &[CrimeIncident],
    ) -> WeightResult<BuildReport> {
        self.config.validate()?;

        let (crimes, skipped) = self.crime_map(network, incidents);
        if skipped > 0 {
            warn!("{skipped} of {} crime incidents could not be snapped", incidents.len());
        }

        let weights = self.safety_weights(network, &crimes);
        let penalised_edges = weights
            .iter()
            .zip(&network.edge_length_m)
            .filter(|(w, l)| w > l)
            .count();
        network.set_safety_weights(weights)?;

        let report = BuildReport {
            incidents_assigned: incidents.len() - skipped,
            incidents_skipped: skipped,
            nodes_with_crime: crimes.len(),
            max_node_crimes: crimes.max(),
            penalised_edges,
        };
        info!(
            "mapped {} incidents onto {} nodes (max {} at one node); {} of {} edges penalised",
            report.incidents_assigned,
            report.nodes_with_crime,
            report.max_node_crimes,
            report.penalised_edges,
            network.edge_count()
        );
        Ok(report)
    }
}

/// Offline pipeline: load a graph file and a crime CSV, annotate, save.
///
/// A missing input file is fatal.
pub fn annotate_graph_file(
    graph_in: &Path,
    crimes_csv: &Path,
    graph_out: &Path,
    config: SafetyConfig,
) -> WeightResult<BuildReport> {
    let (mut network, _) = load_graph_file(graph_in, &config)?;
    let incidents = load_incidents_csv(crimes_csv)?;
    info!("read {} crime incidents from {}", incidents.len(), crimes_csv.display());

    let report = WeightBuilder::new(config).annotate(&mut network, &incidents)?;
    save_graph_file(graph_out, &network)?;
    Ok(report)
}
