//! `sr-route` — online route queries.
//!
//! Given a loaded [`sr_spatial::GraphStore`], answers "shortest route and
//! safer route between these two coordinates" and reports distance and crime
//! exposure for each.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`engine`]   | `RouteEngine`, `RoutePair`, `RouteSummary`                |
//! | [`stats`]    | `PathStatsCalculator`, `PathStats`, `RouteComparison`     |
//! | [`response`] | `RouteQuery`, `RouteResponse`, `ErrorResponse`            |
//! | [`error`]    | `RouteError`, `Endpoint`, `FailedSearch`                  |
//!
//! # Usage
//!
//! ```rust,ignore
//! let store = GraphStore::open(Path::new("chicago_graph.json"), SafetyConfig::default())?;
//! let engine = RouteEngine::new(&store);
//! let pair = engine.find_routes(41.8781, -87.6298, 41.8827, -87.6233)?;
//! println!("{} m vs {} m", pair.risky.stats.distance, pair.safe.stats.distance);
//! ```

pub mod engine;
pub mod error;
pub mod response;
pub mod stats;


pub use engine::{RouteEngine, RoutePair, RouteSummary};
pub use error::{Endpoint, FailedSearch, RouteError, RouteResult};
pub use response::{ErrorResponse, RouteQuery, RouteResponse};
pub use stats::{PathStats, PathStatsCalculator, RouteComparison};
