//! Dual route queries: shortest by length, safest by safety weight.
//!
//! A query snaps both coordinates to graph nodes, runs two independent
//! searches over the same immutable network, and summarises each path.
//! Either both searches succeed or the query fails as a whole.
//!
//! `RouteEngine` only borrows the store and holds no per-query state, so one
//! engine can serve any number of threads at once.

use log::debug;

use sr_core::{GeoPoint, NodeId};
use sr_spatial::{CostKind, DijkstraRouter, GraphStore, Route, Router, SpatialError};

use crate::error::{Endpoint, FailedSearch, RouteError, RouteResult};
use crate::stats::{PathStats, PathStatsCalculator, RouteComparison};

/// One of the two routes of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    /// Node sequence, origin and destination included.
    pub nodes: Vec<NodeId>,
    /// Coordinates of `nodes`, in order.
    pub coords: Vec<GeoPoint>,
    pub stats: PathStats,
}

/// Result of a successful query.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePair {
    /// Minimum-length route.
    pub risky: RouteSummary,
    /// Minimum-safety-weight route.
    pub safe: RouteSummary,
    pub comparison: RouteComparison,
}

/// Answers route queries against a [`GraphStore`].
pub struct RouteEngine<'a, R: Router = DijkstraRouter> {
    store:  &'a GraphStore,
    router: R,
}

impl<'a> RouteEngine<'a> {
    /// Engine using the default Dijkstra search.
    pub fn new(store: &'a GraphStore) -> Self {
        Self::with_router(store, DijkstraRouter)
    }
}

impl<'a, R: Router> RouteEngine<'a, R> {
    pub fn with_router(store: &'a GraphStore, router: R) -> Self {
        Self { store, router }
    }

    /// Find the shortest and the safest route between two coordinates.
    ///
    /// # Errors
    ///
    /// - [`RouteError::GraphNotLoaded`] if the store has no graph.
    /// - [`RouteError::LocationNotFound`] if a coordinate cannot be snapped.
    /// - [`RouteError::NoPathFound`] naming the search(es) that failed.
    pub fn find_routes(
        &self,
        start_lat: f64,
        start_lon: f64,
        end_lat: f64,
        end_lon: f64,
    ) -> RouteResult<RoutePair> {
        let network = self.store.network()?;

        let from = self.snap(Endpoint::Start, start_lat, start_lon)?;
        let to = self.snap(Endpoint::End, end_lat, end_lon)?;

        let risky = self.router.route(network, from, to, CostKind::Length);
        let safe = self.router.route(network, from, to, CostKind::SafetyWeight);

        let (risky, safe) = match (risky, safe) {
            (Ok(r), Ok(s)) => (r, s),
            (Err(SpatialError::NoRoute { .. }), Err(SpatialError::NoRoute { .. })) => {
                return Err(RouteError::NoPathFound { failed: FailedSearch::Both, from, to });
            }
            (Err(SpatialError::NoRoute { .. }), Ok(_)) => {
                return Err(RouteError::NoPathFound { failed: FailedSearch::Risky, from, to });
            }
            (Ok(_), Err(SpatialError::NoRoute { .. })) => {
                return Err(RouteError::NoPathFound { failed: FailedSearch::Safe, from, to });
            }
            (Err(e), _) | (_, Err(e)) => return Err(e.into()),
        };

        let risky = self.summarise(risky)?;
        let safe = self.summarise(safe)?;
        let comparison = RouteComparison::new(risky.stats, safe.stats);

        debug!(
            "{from} -> {to}: risky {} hops {:?}, safe {} hops {:?}",
            risky.nodes.len().saturating_sub(1),
            risky.stats,
            safe.nodes.len().saturating_sub(1),
            safe.stats
        );

        Ok(RoutePair { risky, safe, comparison })
    }

    fn snap(&self, endpoint: Endpoint, lat: f64, lon: f64) -> RouteResult<NodeId> {
        self.store.nearest_node(lat, lon).map_err(|e| match e {
            SpatialError::GraphNotLoaded => RouteError::GraphNotLoaded,
            _ => RouteError::LocationNotFound { endpoint, lat, lon },
        })
    }

    fn summarise(&self, route: Route) -> RouteResult<RouteSummary> {
        let stats = PathStatsCalculator::new(self.store).stats(&route.nodes)?;
        let coords = route
            .nodes
            .iter()
            .map(|&n| self.store.node_position(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RouteSummary { nodes: route.nodes, coords, stats })
    }
}
