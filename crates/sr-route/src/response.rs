//! Wire shapes exchanged with the serving layer.
//!
//! Field names are part of the public API and must not change.

use serde::{Deserialize, Serialize};

use sr_spatial::Router;

use crate::engine::{RouteEngine, RoutePair};
use crate::error::RouteError;

/// A route request.  Coordinates are WGS-84 degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat:   f64,
    pub end_lon:   f64,
}

/// Successful response body.  Paths are `[lat, lon]` pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub risky_path:        Vec<[f64; 2]>,
    pub risky_dist:        i64,
    pub risky_score:       i64,
    pub safe_path:         Vec<[f64; 2]>,
    pub safe_dist:         i64,
    pub safe_score:        i64,
    pub distance_saved:    i64,
    pub safety_improved:   i64,
    pub safety_percentage: f64,
}

impl From<&RoutePair> for RouteResponse {
    fn from(pair: &RoutePair) -> Self {
        Self {
            risky_path:        pair.risky.coords.iter().map(|p| p.to_lat_lon()).collect(),
            risky_dist:        pair.risky.stats.distance,
            risky_score:       pair.risky.stats.risk,
            safe_path:         pair.safe.coords.iter().map(|p| p.to_lat_lon()).collect(),
            safe_dist:         pair.safe.stats.distance,
            safe_score:        pair.safe.stats.risk,
            distance_saved:    pair.comparison.distance_saved,
            safety_improved:   pair.comparison.safety_improved,
            safety_percentage: pair.comparison.safety_percentage,
        }
    }
}

/// Failure response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// One of `graph_not_loaded`, `location_not_found`, `no_path_found`,
    /// `internal`.
    pub kind:    String,
    pub message: String,
}

impl From<&RouteError> for ErrorResponse {
    fn from(e: &RouteError) -> Self {
        Self { kind: e.kind().to_owned(), message: e.to_string() }
    }
}

impl<R: Router> RouteEngine<'_, R> {
    /// Run a query and shape the outcome for the serving layer.
    pub fn respond(&self, query: &RouteQuery) -> Result<RouteResponse, ErrorResponse> {
        self.find_routes(query.start_lat, query.start_lon, query.end_lat, query.end_lon)
            .map(|pair| RouteResponse::from(&pair))
            .map_err(|e| ErrorResponse::from(&e))
    }
}
