//! `sr-weights` — offline safety-weight synthesis.
//!
//! Turns point-pattern crime data into a per-edge `safety_weight` on a road
//! network.  Runs far less often than queries; its output is a graph file
//! that `sr_spatial::GraphStore` loads at process start.
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`crime`]   | `CrimeIncident`, CSV loading                             |
//! | [`builder`] | `WeightBuilder`, `CrimeMap`, `BuildReport`, file pipeline |
//! | [`error`]   | `WeightError`, `WeightResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                               |
//! |------------|------------------------------------------------------|
//! | `parallel` | Snap incidents to nodes in parallel via rayon.       |

pub mod builder;
pub mod crime;
pub mod error;

#[cfg(test)]
mod tests;

pub use builder::{annotate_graph_file, BuildReport, CrimeMap, WeightBuilder};
pub use crime::{load_incidents_csv, load_incidents_reader, CrimeIncident};
pub use error::{WeightError, WeightResult};
