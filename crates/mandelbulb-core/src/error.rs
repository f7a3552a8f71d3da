//! Error types for mandelbulb-rs.

use thiserror::Error;

/// The main error type for mandelbulb-rs operations.
#[derive(Error, Debug)]
pub enum MandelbulbError {
    /// A grid axis was configured with zero or negative divisions.
    #[error("invalid divisions on axis {axis}: {value} (must be >= 1)")]
    InvalidDivisions { axis: char, value: i64 },

    /// The iteration cap was zero or negative.
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(i64),

    /// The power exponent was zero or negative.
    #[error("invalid order: {0} (must be >= 1)")]
    InvalidOrder(i64),

    /// An offset, scale, or rotation component was NaN or infinite.
    #[error("non-finite {0} component in transform parameters")]
    NonFiniteTransform(&'static str),

    /// The volume bounds do not span a positive extent on every axis.
    #[error("invalid volume bounds: min {min:?} must be below max {max:?}")]
    InvalidBounds { min: [f32; 3], max: [f32; 3] },

    /// The worker pool for a parallel fill could not be built.
    #[error("thread pool error: {0}")]
    ThreadPool(String),

    /// A parameter source did not provide a required value.
    #[error("missing parameter '{0}'")]
    MissingParameter(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for mandelbulb-rs operations.
pub type Result<T> = std::result::Result<T, MandelbulbError>;
