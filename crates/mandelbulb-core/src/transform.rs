//! Affine transform applied to world-space samples before evaluation.

use glam::{Mat4, Quat, Vec3};

use crate::error::{MandelbulbError, Result};

/// Offset, non-uniform scale, and XYZ rotation (degrees) applied to a sample.
///
/// The composed matrix translates first, then scales, then rotates about X,
/// then Y, then Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    /// Translation added to the sample.
    pub offset: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Rotation about X, Y, Z in degrees.
    pub rotation_degrees: Vec3,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation_degrees: Vec3::ZERO,
        }
    }
}

impl AffineTransform {
    /// Creates a new identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Creates a transform from its three components.
    #[must_use]
    pub fn new(offset: Vec3, scale: Vec3, rotation_degrees: Vec3) -> Self {
        Self {
            offset,
            scale,
            rotation_degrees,
        }
    }

    /// Creates a transform from a scale.
    #[must_use]
    pub fn from_scale(scale: Vec3) -> Self {
        Self {
            scale,
            ..Default::default()
        }
    }

    /// Creates a transform from XYZ rotation angles in degrees.
    #[must_use]
    pub fn from_rotation_degrees(rotation_degrees: Vec3) -> Self {
        Self {
            rotation_degrees,
            ..Default::default()
        }
    }

    /// Returns the rotation as a quaternion (X applied first, Z last).
    #[must_use]
    pub fn rotation(&self) -> Quat {
        let r = self.rotation_degrees * (std::f32::consts::PI / 180.0);
        Quat::from_rotation_z(r.z) * Quat::from_rotation_y(r.y) * Quat::from_rotation_x(r.x)
    }

    /// Converts this transform to a Mat4.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation())
            * Mat4::from_scale(self.scale)
            * Mat4::from_translation(self.offset)
    }

    /// Applies the transform to a single point.
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.to_matrix().transform_point3(point)
    }

    /// Rejects NaN or infinite components.
    pub fn validate(&self) -> Result<()> {
        if !self.offset.is_finite() {
            return Err(MandelbulbError::NonFiniteTransform("offset"));
        }
        if !self.scale.is_finite() {
            return Err(MandelbulbError::NonFiniteTransform("scale"));
        }
        if !self.rotation_degrees.is_finite() {
            return Err(MandelbulbError::NonFiniteTransform("rotation"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_identity() {
        let p = Vec3::new(0.3, -0.7, 1.2);
        assert!(approx(AffineTransform::identity().transform_point(p), p));
        assert_eq!(AffineTransform::identity().to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_translate_then_scale() {
        let t = AffineTransform::new(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(2.0), Vec3::ZERO);
        // (0 + 1) * 2, not 0 * 2 + 1
        assert!(approx(t.transform_point(Vec3::ZERO), Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_scale_then_rotate() {
        let t = AffineTransform::new(
            Vec3::ZERO,
            Vec3::new(3.0, 1.0, 1.0),
            Vec3::new(0.0, 0.0, 90.0),
        );
        // X scaled to 3, then turned onto +Y
        assert!(approx(t.transform_point(Vec3::X), Vec3::new(0.0, 3.0, 0.0)));
    }

    #[test]
    fn test_rotation_axis_order() {
        let t = AffineTransform::from_rotation_degrees(Vec3::new(90.0, 90.0, 0.0));
        // X first: +Y -> +Z, then Y: +Z -> +X
        assert!(approx(t.transform_point(Vec3::Y), Vec3::X));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let t = AffineTransform::from_scale(Vec3::new(1.0, f32::NAN, 1.0));
        assert!(matches!(
            t.validate(),
            Err(MandelbulbError::NonFiniteTransform("scale"))
        ));
        assert!(AffineTransform::identity().validate().is_ok());
    }
}
