//! Escape-time evaluation of the generalized Mandelbulb map.
//!
//! Each step converts the running point to spherical coordinates, raises the
//! radius to `order`, multiplies both angles by `order`, and adds the starting
//! point back in. A point escapes once the squared length of the next iterate
//! exceeds [`ESCAPE_RADIUS_SQUARED`].

#![allow(clippy::cast_precision_loss)]

use glam::Vec3;

use crate::params::FractalParams;

/// Squared escape radius. A sample is outside once an iterate crosses it.
pub const ESCAPE_RADIUS_SQUARED: f32 = 8.0;

/// Default power exponent of the map.
pub const DEFAULT_ORDER: u32 = 6;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 16;

/// Returns the iteration at which `point` escapes, or `max_iterations` if it
/// stays bounded for the whole run.
///
/// The result is always in `[0, max_iterations]`. A zero-radius iterate takes
/// whatever `atan2(0, 0)` yields on the platform (0 everywhere we ship), which
/// keeps the origin fixed under the map.
#[must_use]
pub fn escape_iteration(point: Vec3, max_iterations: u32, order: u32) -> u32 {
    let n = order as f32;
    let Vec3 { x: x0, y: y0, z: z0 } = point;
    let (mut x, mut y, mut z) = (x0, y0, z0);

    for i in 0..max_iterations {
        let r = (x * x + y * y + z * z).sqrt();
        let theta = (x * x + y * y).sqrt().atan2(z);
        let phi = y.atan2(x);

        let rn = r.powf(n);
        let x_new = rn * (theta * n).sin() * (phi * n).cos() + x0;
        let y_new = rn * (theta * n).sin() * (phi * n).sin() + y0;
        let z_new = rn * (theta * n).cos() + z0;

        if x_new * x_new + y_new * y_new + z_new * z_new > ESCAPE_RADIUS_SQUARED {
            return i;
        }

        x = x_new;
        y = y_new;
        z = z_new;
    }

    max_iterations
}

/// Returns true if `point` never escapes within the configured iteration cap.
#[must_use]
pub fn is_inside(point: Vec3, params: &FractalParams) -> bool {
    escape_iteration(point, params.max_iterations, params.order) == params.max_iterations
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_origin_never_escapes() {
        for order in 1..=8 {
            for max in [1, 16, 64] {
                assert_eq!(escape_iteration(Vec3::ZERO, max, order), max);
            }
        }
    }

    #[test]
    fn test_far_point_escapes_immediately() {
        let p = Vec3::new(10.0, 10.0, 10.0);
        for order in 1..=8 {
            assert_eq!(escape_iteration(p, 16, order), 0);
            assert_eq!(escape_iteration(p, 1, order), 0);
        }
    }

    #[test]
    fn test_zero_iterations_returns_zero() {
        assert_eq!(escape_iteration(Vec3::new(5.0, 5.0, 5.0), 0, 6), 0);
    }

    #[test]
    fn test_small_point_is_inside() {
        let params = FractalParams::default();
        assert!(is_inside(Vec3::splat(-0.25), &params));
        assert!(is_inside(Vec3::splat(0.25), &params));
        assert!(!is_inside(Vec3::splat(5.0), &params));
    }

    #[test]
    fn test_deterministic() {
        let p = Vec3::new(0.7, -0.3, 0.55);
        let a = escape_iteration(p, 32, 8);
        let b = escape_iteration(p, 32, 8);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn escape_count_is_bounded(
            x in -4.0f32..4.0,
            y in -4.0f32..4.0,
            z in -4.0f32..4.0,
            max in 1u32..48,
            order in 1u32..12,
        ) {
            let i = escape_iteration(Vec3::new(x, y, z), max, order);
            prop_assert!(i <= max);
        }

        #[test]
        fn points_beyond_escape_radius_escape_at_first_step(
            dir in (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0),
            order in 1u32..8,
        ) {
            let d = Vec3::new(dir.0, dir.1, dir.2);
            prop_assume!(d.length() > 0.1);
            // Radius 4 puts |p^n + p| well past sqrt(8) for any n >= 1.
            let p = d.normalize() * 4.0;
            prop_assert_eq!(escape_iteration(p, 16, order), 0);
        }
    }
}
