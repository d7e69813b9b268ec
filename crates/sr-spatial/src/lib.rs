//! `sr-spatial` — road network, nearest-node index, graph files, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`index`]   | `SpatialIndex` (R-tree nearest neighbour, planar lat/lon)   |
//! | [`network`] | `RoadNetwork` (CSR), `RoadNetworkBuilder`                   |
//! | [`persist`] | JSON graph files, `parse_with_default` load coercion        |
//! | [`store`]   | `GraphStore` (loaded network + index), `EdgeAttributes`     |
//! | [`router`]  | `Router` trait, `CostKind`, `Route`, `DijkstraRouter`       |
//! | [`osm`]     | `load_from_pbf` (feature = `"osm"` only)                    |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.              |
//! | `serde` | Derives `Serialize`/`Deserialize` on `sr-core` public types. |

pub mod error;
pub mod index;
pub mod network;
pub mod persist;
pub mod router;
pub mod store;

#[cfg(feature = "osm")]
pub mod osm;


pub use error::{SpatialError, SpatialResult};
pub use index::SpatialIndex;
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use persist::{load_graph_file, save_graph_file, GraphDocument, LoadReport};
pub use router::{CostKind, DijkstraRouter, Route, Router};
pub use store::{EdgeAttributes, GraphStore};
