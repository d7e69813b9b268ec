//! Error types for sr-weights.

use thiserror::Error;

use sr_core::CoreError;
use sr_spatial::SpatialError;

/// Errors raised by the offline weight build.
#[derive(Debug, Error)]
pub enum WeightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("crime data parse error: {0}")]
    Parse(String),

    #[error("crime data has no {0} column")]
    MissingColumn(&'static str),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Alias for `Result<T, WeightError>`.
pub type WeightResult<T> = Result<T, WeightError>;
