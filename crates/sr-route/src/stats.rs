//! Distance and crime-exposure totals along a node path.
//!
//! Risk is the pure penalty part of each edge, `safety_weight − length`,
//! clamped at zero, so it never double-counts distance.  Both totals are
//! accumulated in `f64` and truncated toward zero at the end.

use serde::Serialize;

use sr_core::NodeId;
use sr_spatial::{GraphStore, SpatialResult};

/// Integer totals for one path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PathStats {
    /// Metres.
    pub distance: i64,
    /// Summed crime penalty.
    pub risk: i64,
}

/// Sums edge attributes over consecutive node pairs.
pub struct PathStatsCalculator<'a> {
    store: &'a GraphStore,
}

impl<'a> PathStatsCalculator<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// Totals for `path`.  Empty and single-node paths are `(0, 0)`.
    ///
    /// Each hop uses the edge [`GraphStore::edge_attributes`] selects, i.e.
    /// the shortest of any parallel edges.  Stats depend only on the node
    /// sequence, so where parallel edges differ the safe route is scored by
    /// the shortest edge of each hop, not necessarily the one its search
    /// traversed.
    pub fn stats(&self, path: &[NodeId]) -> SpatialResult<PathStats> {
        let mut distance = 0.0_f64;
        let mut risk = 0.0_f64;
        for hop in path.windows(2) {
            let attrs = self.store.edge_attributes(hop[0], hop[1])?;
            distance += attrs.length;
            risk += (attrs.safety_weight - attrs.length).max(0.0);
        }
        Ok(PathStats { distance: distance as i64, risk: risk as i64 })
    }
}

/// How the safe route compares with the shortest one.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct RouteComparison {
    /// `max(0, risky_dist − safe_dist)`.
    pub distance_saved: i64,
    /// Risk avoided by taking the safe route: `max(0, risky_score − safe_score)`.
    pub safety_improved: i64,
    /// `(1 − safe_score / risky_score) × 100`, or 0 when the risky route has
    /// no risk.
    pub safety_percentage: f64,
}

impl RouteComparison {
    pub fn new(risky: PathStats, safe: PathStats) -> Self {
        let safety_percentage = if risky.risk > 0 {
            (1.0 - safe.risk as f64 / risky.risk as f64) * 100.0
        } else {
            0.0
        };
        Self {
            distance_saved: (risky.distance - safe.distance).max(0),
            safety_improved: (risky.risk - safe.risk).max(0),
            safety_percentage,
        }
    }
}
