//! mandelbulb-rs: binary Mandelbulb density volumes.
//!
//! Every voxel of a regular grid is mapped to a point in the fractal's space
//! and classified with an escape-time test. The result is a density volume
//! holding `0.0` or `1.0` per cell.
//!
//! # Quick Start
//!
//! ```no_run
//! use mandelbulb::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let config = MandelbulbConfig::new()
//!         .with_divisions(64, 64, 64)
//!         .with_order(8);
//!     let volume = generate(&config)?;
//!
//!     let inside = volume.count_value(0.0);
//!     println!("{inside} of {} voxels inside", volume.num_voxels());
//!     Ok(())
//! }
//! ```
//!
//! # Pipeline
//!
//! For each voxel index:
//!
//! 1. The index maps to normalized `[0, 1]^3` coordinates (voxel centers).
//! 2. The volume maps normalized coordinates onto its world bounds.
//! 3. The configured [`AffineTransform`] is applied (offset, scale, then XYZ rotation).
//! 4. [`escape_iteration`] classifies the point; [`DensityPolarity`] picks the value.
//!
//! # Strategies
//!
//! [`FillStrategy::Sequential`] walks the grid in z/y/x order on one thread.
//! [`FillStrategy::Parallel`] hands the volume's tiles to a rayon pool. Both
//! produce identical volumes.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod fill;
pub mod params;

// Re-export core types
pub use mandelbulb_core::{
    escape_iteration, grid_index_to_eval_point, is_inside, AffineTransform, DensityPolarity,
    FractalParams, MandelbulbError, Result, VoxelContainer, VoxelSpace, DEFAULT_MAX_ITERATIONS,
    DEFAULT_ORDER, ESCAPE_RADIUS_SQUARED,
};

// Re-export volume types
pub use mandelbulb_volume::{
    TileLayout, VolumeSpace, VoxelTile, VoxelVolume, DEFAULT_VOLUME_NAME, TILE_SIZE,
};

pub use config::{FillSettings, FillStrategy, MandelbulbConfig, DEFAULT_DIVISIONS};
pub use fill::{fill, fill_parallel, fill_sequential, sample_voxel};
pub use params::{JsonParameters, ParameterSource};

// Re-export glam types for convenience
pub use glam::{Mat4, UVec3, Vec3};

/// Initializes `env_logger` if no logger is installed yet.
///
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Validates `config`, then builds and fills a new density volume.
///
/// Nothing is allocated if validation fails.
pub fn generate(config: &MandelbulbConfig) -> Result<VoxelVolume> {
    let settings = config.validate()?;
    let mut volume = VoxelVolume::new(
        DEFAULT_VOLUME_NAME,
        settings.resolution,
        settings.bound_min,
        settings.bound_max,
    );
    fill(&mut volume, &settings)?;
    log_summary(&volume, &settings);
    Ok(volume)
}

/// Validates `config`, resizes `volume` to the configured divisions and
/// bounds, and fills it.
///
/// The volume keeps its name and background. On a validation error the
/// volume is left untouched.
pub fn generate_into(volume: &mut VoxelVolume, config: &MandelbulbConfig) -> Result<()> {
    let settings = config.validate()?;
    volume.resize(settings.resolution);
    fill(volume, &settings)?;
    log_summary(volume, &settings);
    Ok(())
}

fn log_summary(volume: &VoxelVolume, settings: &FillSettings) {
    let inside = volume.count_value(settings.fractal.polarity.value(true));
    log::info!(
        "mandelbulb order {} / {} iterations: {inside} of {} voxels inside",
        settings.fractal.order,
        settings.fractal.max_iterations,
        volume.num_voxels()
    );
}
