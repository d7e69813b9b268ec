//! `sr-core` — foundational types for the saferoute engine.
//!
//! Every other `sr-*` crate depends on this one.  It has no `sr-*`
//! dependencies and only `thiserror` and `serde` externally.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`                                    |
//! | [`geo`]         | `GeoPoint`, planar and haversine distances            |
//! | [`config`]      | `SafetyConfig` (penalty factor, load defaults)        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `NodeId`, `EdgeId` and   |
//! |         | `GeoPoint`.                                                |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SafetyConfig;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId};
