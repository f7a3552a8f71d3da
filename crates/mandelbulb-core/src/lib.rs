//! Core abstractions for mandelbulb-rs.
//!
//! This crate provides the pure numerical pieces used by every fill strategy:
//! - [`escape_iteration`] and the membership rule built on top of it
//! - [`FractalParams`] and [`DensityPolarity`] describing how a sample becomes a density
//! - [`AffineTransform`] composing the offset/scale/rotation applied before evaluation
//! - The [`VoxelSpace`] trait and [`grid_index_to_eval_point`] pipeline

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod escape;
pub mod params;
pub mod space;
pub mod transform;

pub use error::{MandelbulbError, Result};
pub use escape::{
    escape_iteration, is_inside, DEFAULT_MAX_ITERATIONS, DEFAULT_ORDER, ESCAPE_RADIUS_SQUARED,
};
pub use params::{DensityPolarity, FractalParams};
pub use space::{grid_index_to_eval_point, VoxelContainer, VoxelSpace};
pub use transform::AffineTransform;

// Re-export glam types for convenience
pub use glam::{Mat4, UVec3, Vec3};
