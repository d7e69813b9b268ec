//! Query error type.
//!
//! Every failure of an online query is classified into one of these
//! variants; callers never receive a half-filled result.

use std::fmt;

use thiserror::Error;

use sr_core::NodeId;
use sr_spatial::SpatialError;

/// Which query coordinate failed to snap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Start => "start",
            Endpoint::End => "end",
        })
    }
}

/// Which of the two searches found no path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailedSearch {
    /// The shortest-distance search.
    Risky,
    /// The minimum-safety-weight search.
    Safe,
    Both,
}

impl fmt::Display for FailedSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailedSearch::Risky => "risky",
            FailedSearch::Safe => "safe",
            FailedSearch::Both => "risky and safe",
        })
    }
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("graph not loaded")]
    GraphNotLoaded,

    #[error("no road node near {endpoint} location ({lat}, {lon})")]
    LocationNotFound { endpoint: Endpoint, lat: f64, lon: f64 },

    #[error("no path from {from} to {to} ({failed} search)")]
    NoPathFound { failed: FailedSearch, from: NodeId, to: NodeId },

    /// A graph inconsistency that well-formed data cannot produce.
    #[error("internal graph error: {0}")]
    Spatial(SpatialError),
}

impl RouteError {
    /// Stable machine-readable tag for the serving layer.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteError::GraphNotLoaded => "graph_not_loaded",
            RouteError::LocationNotFound { .. } => "location_not_found",
            RouteError::NoPathFound { .. } => "no_path_found",
            RouteError::Spatial(_) => "internal",
        }
    }
}

impl From<SpatialError> for RouteError {
    fn from(e: SpatialError) -> Self {
        match e {
            SpatialError::GraphNotLoaded => RouteError::GraphNotLoaded,
            other => RouteError::Spatial(other),
        }
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
