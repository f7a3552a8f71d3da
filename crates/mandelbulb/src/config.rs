//! Configuration snapshot for one fill.
//!
//! A [`MandelbulbConfig`] holds raw values as a host supplies them. Calling
//! [`MandelbulbConfig::validate`] checks them and produces [`FillSettings`],
//! the typed form every fill strategy consumes.

use std::path::Path;

use glam::{Mat4, UVec3, Vec3};
use mandelbulb_core::{
    AffineTransform, DensityPolarity, FractalParams, MandelbulbError, Result,
    DEFAULT_MAX_ITERATIONS, DEFAULT_ORDER,
};
use serde::{Deserialize, Serialize};

/// Default grid divisions per axis.
pub const DEFAULT_DIVISIONS: i64 = 64;

/// How the grid is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStrategy {
    /// One thread, z/y/x loop order.
    Sequential,
    /// Tiles distributed over a worker pool.
    ///
    /// `threads == 0` uses rayon's global pool, sized by hardware parallelism.
    Parallel { threads: usize },
}

impl Default for FillStrategy {
    fn default() -> Self {
        FillStrategy::Parallel { threads: 0 }
    }
}

impl FillStrategy {
    /// Returns true for the tiled-parallel strategy.
    #[must_use]
    pub fn is_parallel(self) -> bool {
        matches!(self, FillStrategy::Parallel { .. })
    }
}

/// Parameters of one fill, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MandelbulbConfig {
    /// Voxels along X, Y, Z.
    pub divisions: [i64; 3],
    /// Whether to fill tiles in parallel.
    pub use_parallel: bool,
    /// Worker count for a parallel fill (0 = hardware default).
    pub threads: usize,
    /// Power exponent of the map.
    pub order: i64,
    /// Iteration cap.
    pub max_iterations: i64,
    /// Translation applied to each world-space sample.
    pub offset: Vec3,
    /// Per-axis scale applied after the offset.
    pub scale: Vec3,
    /// Rotation about X, Y, Z in degrees, applied last.
    pub rotation: Vec3,
    /// Density written for inside/outside points.
    pub polarity: DensityPolarity,
    /// Minimum corner of the volume in world space.
    pub bound_min: Vec3,
    /// Maximum corner of the volume in world space.
    pub bound_max: Vec3,
}

impl Default for MandelbulbConfig {
    fn default() -> Self {
        Self {
            divisions: [DEFAULT_DIVISIONS; 3],
            use_parallel: true,
            threads: 0,
            order: i64::from(DEFAULT_ORDER),
            max_iterations: i64::from(DEFAULT_MAX_ITERATIONS),
            offset: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            polarity: DensityPolarity::default(),
            bound_min: Vec3::splat(-1.0),
            bound_max: Vec3::splat(1.0),
        }
    }
}

impl MandelbulbConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the divisions.
    #[must_use]
    pub fn with_divisions(mut self, x: i64, y: i64, z: i64) -> Self {
        self.divisions = [x, y, z];
        self
    }

    /// Sets the fractal order.
    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: i64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Selects sequential or parallel filling.
    #[must_use]
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Sets the worker count of a parallel fill.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets offset, scale, and rotation (degrees).
    #[must_use]
    pub fn with_transform(mut self, offset: Vec3, scale: Vec3, rotation: Vec3) -> Self {
        self.offset = offset;
        self.scale = scale;
        self.rotation = rotation;
        self
    }

    /// Sets the density polarity.
    #[must_use]
    pub fn with_polarity(mut self, polarity: DensityPolarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Sets the world-space bounds of the volume.
    #[must_use]
    pub fn with_bounds(mut self, bound_min: Vec3, bound_max: Vec3) -> Self {
        self.bound_min = bound_min;
        self.bound_max = bound_max;
        self
    }

    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every value and returns the typed settings of a fill.
    ///
    /// Nothing is allocated before this succeeds.
    pub fn validate(&self) -> Result<FillSettings> {
        let mut resolution = [0u32; 3];
        for ((axis, &value), slot) in ['x', 'y', 'z']
            .into_iter()
            .zip(&self.divisions)
            .zip(&mut resolution)
        {
            *slot = u32::try_from(value)
                .ok()
                .filter(|&v| v >= 1)
                .ok_or(MandelbulbError::InvalidDivisions { axis, value })?;
        }

        let max_iterations = u32::try_from(self.max_iterations)
            .ok()
            .filter(|&v| v >= 1)
            .ok_or(MandelbulbError::InvalidMaxIterations(self.max_iterations))?;

        let order = u32::try_from(self.order)
            .ok()
            .filter(|&v| v >= 1)
            .ok_or(MandelbulbError::InvalidOrder(self.order))?;

        let transform = AffineTransform::new(self.offset, self.scale, self.rotation);
        transform.validate()?;

        let bounds_ok = self.bound_min.is_finite()
            && self.bound_max.is_finite()
            && self.bound_min.cmplt(self.bound_max).all();
        if !bounds_ok {
            return Err(MandelbulbError::InvalidBounds {
                min: self.bound_min.to_array(),
                max: self.bound_max.to_array(),
            });
        }

        let strategy = if self.use_parallel {
            FillStrategy::Parallel {
                threads: self.threads,
            }
        } else {
            FillStrategy::Sequential
        };

        Ok(FillSettings {
            resolution: UVec3::from_array(resolution),
            fractal: FractalParams::new(order, max_iterations).with_polarity(self.polarity),
            matrix: transform.to_matrix(),
            strategy,
            bound_min: self.bound_min,
            bound_max: self.bound_max,
        })
    }
}

/// Validated, immutable settings shared by every worker of a fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSettings {
    /// Voxels along each axis, all at least 1.
    pub resolution: UVec3,
    /// Escape test parameters.
    pub fractal: FractalParams,
    /// Composed transform matrix.
    pub matrix: Mat4,
    /// Traversal strategy.
    pub strategy: FillStrategy,
    /// Minimum corner of the volume.
    pub bound_min: Vec3,
    /// Maximum corner of the volume.
    pub bound_max: Vec3,
}

impl FillSettings {
    /// Returns a copy with a different strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: FillStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
