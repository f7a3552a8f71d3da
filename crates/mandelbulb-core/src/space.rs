//! Mapping from grid indices to the points the escape test consumes.

use glam::{Mat4, UVec3, Vec3};

/// Coordinate mappings supplied by a voxel container.
///
/// Implementors own the meaning of "normalized" and "world" space; the fill
/// only chains the two mappings and then applies its own affine transform.
pub trait VoxelSpace {
    /// Number of voxels along each axis.
    fn resolution(&self) -> UVec3;

    /// Maps a voxel index to normalized `[0, 1]^3` coordinates.
    fn index_to_normalized(&self, index: UVec3) -> Vec3;

    /// Maps normalized coordinates to the container's world space.
    fn from_normalized_space(&self, normalized: Vec3) -> Vec3;
}

/// A writable dense voxel grid.
pub trait VoxelContainer: VoxelSpace {
    /// Reallocates the grid to `resolution`, discarding previous contents.
    fn resize(&mut self, resolution: UVec3);

    /// Writes one cell.
    fn set_value(&mut self, index: UVec3, value: f32);
}

/// Returns the evaluation point for voxel `index`.
///
/// The index goes to normalized space, then to the container's world space,
/// and finally through `affine`.
#[must_use]
pub fn grid_index_to_eval_point<S: VoxelSpace + ?Sized>(
    index: UVec3,
    space: &S,
    affine: &Mat4,
) -> Vec3 {
    let normalized = space.index_to_normalized(index);
    let world = space.from_normalized_space(normalized);
    affine.transform_point3(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cell-centered unit box mapped onto `[-1, 1]^3`.
    struct UnitBox(UVec3);

    impl VoxelSpace for UnitBox {
        fn resolution(&self) -> UVec3 {
            self.0
        }

        fn index_to_normalized(&self, index: UVec3) -> Vec3 {
            (index.as_vec3() + 0.5) / self.0.as_vec3()
        }

        fn from_normalized_space(&self, normalized: Vec3) -> Vec3 {
            normalized * 2.0 - 1.0
        }
    }

    #[test]
    fn test_single_cell_maps_to_center() {
        let space = UnitBox(UVec3::ONE);
        let p = grid_index_to_eval_point(UVec3::ZERO, &space, &Mat4::IDENTITY);
        assert_eq!(p, Vec3::ZERO);
    }

    #[test]
    fn test_affine_applied_last() {
        let space = UnitBox(UVec3::splat(4));
        let affine = Mat4::from_translation(Vec3::splat(5.0));
        let p = grid_index_to_eval_point(UVec3::new(2, 2, 2), &space, &affine);
        assert!((p - Vec3::splat(5.25)).length() < 1e-6);
    }
}
