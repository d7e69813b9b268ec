//! Nearest-neighbour index over a fixed set of 2-D points.
//!
//! Backed by an `rstar` R-tree bulk-loaded in O(n log n); each query is
//! O(log n).  Distances are planar Euclidean on `(lat, lon)` degrees, not
//! geodesic.  Within a single city the ranking error is small, and it is the
//! same approximation the prebuilt graphs were annotated with, so snapping
//! stays consistent between the offline build and the online queries.
//!
//! # Ties
//!
//! When several points sit at exactly the minimum distance, the one that
//! appeared first in the `build` input wins.  Every entry carries its input
//! ordinal so this holds regardless of R-tree traversal order.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct IndexEntry<I> {
    point:   [f64; 2], // [lat, lon]
    ordinal: u32,
    id:      I,
}

impl<I> RTreeObject for IndexEntry<I> {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl<I> PointDistance for IndexEntry<I> {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

/// Immutable nearest-point lookup keyed by an arbitrary `Copy` id.
pub struct SpatialIndex<I> {
    tree: RTree<IndexEntry<I>>,
}

impl<I: Copy> SpatialIndex<I> {
    /// Bulk-load the index from `(id, lat, lon)` triples.
    pub fn build<P>(points: P) -> Self
    where
        P: IntoIterator<Item = (I, f64, f64)>,
    {
        let entries: Vec<IndexEntry<I>> = points
            .into_iter()
            .enumerate()
            .map(|(i, (id, lat, lon))| IndexEntry {
                point: [lat, lon],
                ordinal: i as u32,
                id,
            })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Nearest point to `(lat, lon)` and its planar distance in degrees.
    ///
    /// # Errors
    ///
    /// [`SpatialError::EmptyIndex`] if the index holds no points, and
    /// [`SpatialError::InvalidCoordinate`] if `lat` or `lon` is not finite.
    pub fn query(&self, lat: f64, lon: f64) -> SpatialResult<(I, f64)> {
        // rstar cannot order NaN distances.
        if !lat.is_finite() || !lon.is_finite() {
            return Err(SpatialError::InvalidCoordinate { lat, lon });
        }

        let mut candidates = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&[lat, lon]);

        let (first, best_d2) = candidates.next().ok_or(SpatialError::EmptyIndex)?;
        let mut best = first;

        // Remaining equidistant candidates: keep the earliest input.
        for (entry, d2) in candidates {
            if d2 > best_d2 {
                break;
            }
            if entry.ordinal < best.ordinal {
                best = entry;
            }
        }

        Ok((best.id, best_d2.sqrt()))
    }
}
