//! Fractal parameters and the density convention applied to each sample.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::escape::{is_inside, DEFAULT_MAX_ITERATIONS, DEFAULT_ORDER};

/// Which density value marks a point inside the set.
///
/// `InsideZero` writes `0.0` for bounded points and `1.0` for escaped ones.
/// `InsideOne` is the conventional "solid = 1" occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DensityPolarity {
    /// Inside = 0.0, outside = 1.0.
    #[default]
    InsideZero,
    /// Inside = 1.0, outside = 0.0.
    InsideOne,
}

impl DensityPolarity {
    /// Density written for a point with the given membership.
    #[must_use]
    pub fn value(self, inside: bool) -> f32 {
        match (self, inside) {
            (DensityPolarity::InsideZero, true) | (DensityPolarity::InsideOne, false) => 0.0,
            (DensityPolarity::InsideZero, false) | (DensityPolarity::InsideOne, true) => 1.0,
        }
    }
}

/// Parameters of the escape-time test, immutable for one fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FractalParams {
    /// Power exponent of the map.
    pub order: u32,
    /// Iteration cap.
    pub max_iterations: u32,
    /// Density convention.
    pub polarity: DensityPolarity,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            polarity: DensityPolarity::default(),
        }
    }
}

impl FractalParams {
    /// Creates parameters with the default polarity.
    #[must_use]
    pub fn new(order: u32, max_iterations: u32) -> Self {
        Self {
            order,
            max_iterations,
            ..Default::default()
        }
    }

    /// Sets the density polarity.
    #[must_use]
    pub fn with_polarity(mut self, polarity: DensityPolarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Classifies `point` and returns its density value.
    #[must_use]
    pub fn density(&self, point: Vec3) -> f32 {
        self.polarity.value(is_inside(point, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = FractalParams::default();
        assert_eq!(p.order, 6);
        assert_eq!(p.max_iterations, 16);
        assert_eq!(p.polarity, DensityPolarity::InsideZero);
    }

    #[test]
    fn test_polarity_values() {
        let params = FractalParams::default();
        assert_eq!(params.density(Vec3::ZERO), 0.0);
        assert_eq!(params.density(Vec3::splat(5.0)), 1.0);

        let conventional = params.with_polarity(DensityPolarity::InsideOne);
        assert_eq!(conventional.density(Vec3::ZERO), 1.0);
        assert_eq!(conventional.density(Vec3::splat(5.0)), 0.0);
    }

    #[test]
    fn test_polarity_serde_names() {
        let json = serde_json::to_string(&DensityPolarity::InsideOne).unwrap();
        assert_eq!(json, "\"insideOne\"");
        let back: DensityPolarity = serde_json::from_str("\"insideZero\"").unwrap();
        assert_eq!(back, DensityPolarity::InsideZero);
    }
}
