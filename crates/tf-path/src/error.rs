//! Track-loading error type.

use thiserror::Error;

/// Errors produced while loading or building a [`GeoPath`][crate::GeoPath].
///
/// All of them are fatal at start-up: a simulation never runs without a
/// valid path.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("path needs at least 2 valid points, found {usable}")]
    TooFewPoints { usable: usize },

    #[error("path total length is {0} m, expected > 0")]
    ZeroLength(f64),

    #[error("track file has no pathPoints")]
    MissingPoints,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PathResult<T> = Result<T, PathError>;
