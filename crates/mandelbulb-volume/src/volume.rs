//! Dense voxel volume with tiled storage.

use glam::{UVec3, Vec3};
use mandelbulb_core::{VoxelContainer, VoxelSpace};

use crate::tile::{TileLayout, VoxelTile, TILE_SIZE};

/// Default name given to generated volumes.
pub const DEFAULT_VOLUME_NAME: &str = "density";

/// A regular axis-aligned 3D grid of scalar values.
///
/// `VoxelVolume` is defined by:
/// - Resolution (number of voxels in X, Y, Z)
/// - Bounding box (min and max corners in world space)
///
/// Values sit at voxel centers. Storage is split into [`VoxelTile`]s so that a
/// parallel fill can hand each worker a disjoint `&mut` tile.
#[derive(Debug, Clone)]
pub struct VoxelVolume {
    name: String,

    // Grid parameters
    bound_min: Vec3,
    bound_max: Vec3,
    background: f32,
    layout: TileLayout,

    tiles: Vec<VoxelTile>,
}

impl Default for VoxelVolume {
    fn default() -> Self {
        Self::new(
            DEFAULT_VOLUME_NAME,
            UVec3::ONE,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        )
    }
}

impl VoxelVolume {
    /// Creates a new volume with every cell set to 0.
    ///
    /// # Arguments
    /// * `name` - The name of the volume
    /// * `resolution` - Number of voxels in each dimension (X, Y, Z)
    /// * `bound_min` - Minimum corner of the volume bounding box
    /// * `bound_max` - Maximum corner of the volume bounding box
    pub fn new(
        name: impl Into<String>,
        resolution: UVec3,
        bound_min: Vec3,
        bound_max: Vec3,
    ) -> Self {
        let layout = TileLayout::new(resolution, TILE_SIZE);
        let mut volume = Self {
            name: name.into(),
            bound_min,
            bound_max,
            background: 0.0,
            layout,
            tiles: Vec::new(),
        };
        volume.allocate();
        volume
    }

    /// Creates a volume with uniform resolution over the default `[-1, 1]^3` box.
    pub fn new_uniform(name: impl Into<String>, dim: u32) -> Self {
        Self::new(name, UVec3::splat(dim), Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    /// Sets the value unwritten cells hold and resets every cell to it.
    #[must_use]
    pub fn with_background(mut self, background: f32) -> Self {
        self.background = background;
        self.allocate();
        self
    }

    /// Changes the tile edge length and reallocates storage.
    #[must_use]
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.layout = TileLayout::new(self.layout.resolution(), tile_size);
        self.allocate();
        self
    }

    fn allocate(&mut self) {
        let layout = self.layout;
        self.tiles = (0..layout.num_tiles())
            .map(|id| {
                VoxelTile::new(
                    layout.tile_origin(id),
                    layout.tile_extent(id),
                    self.background,
                )
            })
            .collect();
    }

    /// Returns the volume name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of voxels in each dimension.
    #[must_use]
    pub fn resolution(&self) -> UVec3 {
        self.layout.resolution()
    }

    /// Returns the total number of voxels.
    #[must_use]
    pub fn num_voxels(&self) -> u64 {
        let r = self.resolution();
        u64::from(r.x) * u64::from(r.y) * u64::from(r.z)
    }

    /// Returns the minimum bound.
    #[must_use]
    pub fn bound_min(&self) -> Vec3 {
        self.bound_min
    }

    /// Returns the maximum bound.
    #[must_use]
    pub fn bound_max(&self) -> Vec3 {
        self.bound_max
    }

    /// Moves the volume to a new world-space box. Cell values are kept.
    pub fn set_bounds(&mut self, bound_min: Vec3, bound_max: Vec3) {
        self.bound_min = bound_min;
        self.bound_max = bound_max;
    }

    /// Returns the background value.
    #[must_use]
    pub fn background(&self) -> f32 {
        self.background
    }

    /// Returns the world-space size of one voxel.
    #[must_use]
    pub fn voxel_size(&self) -> Vec3 {
        (self.bound_max - self.bound_min) / self.resolution().max(UVec3::ONE).as_vec3()
    }

    /// Returns a copy of the volume's coordinate mappings.
    #[must_use]
    pub fn space(&self) -> VolumeSpace {
        VolumeSpace::new(self.resolution(), self.bound_min, self.bound_max)
    }

    /// Returns the tile layout.
    #[must_use]
    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    /// Returns the number of tiles.
    #[must_use]
    pub fn num_tiles(&self) -> usize {
        self.tiles.len()
    }

    /// Returns the tiles in linear order.
    #[must_use]
    pub fn tiles(&self) -> &[VoxelTile] {
        &self.tiles
    }

    /// Returns the tiles mutably. Each tile covers a disjoint set of voxels.
    pub fn tiles_mut(&mut self) -> &mut [VoxelTile] {
        &mut self.tiles
    }

    /// Reallocates to `resolution` and resets every cell to the background value.
    pub fn resize(&mut self, resolution: UVec3) {
        self.layout = TileLayout::new(resolution, self.layout.tile_size());
        self.allocate();
        log::debug!(
            "volume '{}' resized to {}x{}x{} ({} tiles)",
            self.name,
            resolution.x,
            resolution.y,
            resolution.z,
            self.tiles.len()
        );
    }

    /// Writes one cell. Out-of-range indices are ignored.
    pub fn set_value(&mut self, index: UVec3, value: f32) {
        if let Some((tile, offset)) = self.layout.locate(index) {
            self.tiles[tile].set(offset, value);
        } else {
            log::warn!(
                "ignoring write outside volume '{}': {index} not in {}",
                self.name,
                self.resolution()
            );
        }
    }

    /// Reads one cell, or `None` outside the grid.
    #[must_use]
    pub fn value(&self, index: UVec3) -> Option<f32> {
        self.layout
            .locate(index)
            .map(|(tile, offset)| self.tiles[tile].get(offset))
    }

    /// Flattens a 3D voxel index to a linear index (x fastest).
    #[must_use]
    pub fn flatten_index(&self, index: UVec3) -> u64 {
        let r = self.resolution();
        u64::from(index.x)
            + (u64::from(index.y) * u64::from(r.x))
            + (u64::from(index.z) * u64::from(r.x) * u64::from(r.y))
    }

    /// Unflattens a linear index to a 3D voxel index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn unflatten_index(&self, idx: u64) -> UVec3 {
        let r = self.resolution();
        let x = idx % u64::from(r.x);
        let y = (idx / u64::from(r.x)) % u64::from(r.y);
        let z = idx / (u64::from(r.x) * u64::from(r.y));
        UVec3::new(x as u32, y as u32, z as u32)
    }

    /// Copies all values into a linear array in [`flatten_index`](Self::flatten_index) order.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_linear(&self) -> Vec<f32> {
        let mut out = vec![self.background; self.num_voxels() as usize];
        for tile in &self.tiles {
            for (index, &v) in tile.voxel_indices().zip(tile.values()) {
                out[self.flatten_index(index) as usize] = v;
            }
        }
        out
    }

    /// Counts cells holding exactly `value`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn count_value(&self, value: f32) -> usize {
        self.tiles
            .iter()
            .map(|t| t.values().iter().filter(|&&v| v == value).count())
            .sum()
    }
}

/// Snapshot of a volume's coordinate mappings.
///
/// Lets a fill evaluate sample points while the volume's tiles are
/// mutably borrowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeSpace {
    resolution: UVec3,
    bound_min: Vec3,
    bound_max: Vec3,
}

impl VolumeSpace {
    /// Creates a mapping for `resolution` voxels spanning the given box.
    #[must_use]
    pub fn new(resolution: UVec3, bound_min: Vec3, bound_max: Vec3) -> Self {
        Self {
            resolution,
            bound_min,
            bound_max,
        }
    }
}

impl VoxelSpace for VolumeSpace {
    fn resolution(&self) -> UVec3 {
        self.resolution
    }

    /// Cell-center convention: `(i + 0.5) / res`.
    fn index_to_normalized(&self, index: UVec3) -> Vec3 {
        (index.as_vec3() + 0.5) / self.resolution.max(UVec3::ONE).as_vec3()
    }

    fn from_normalized_space(&self, normalized: Vec3) -> Vec3 {
        self.bound_min + normalized * (self.bound_max - self.bound_min)
    }
}

impl VoxelSpace for VoxelVolume {
    fn resolution(&self) -> UVec3 {
        self.layout.resolution()
    }

    fn index_to_normalized(&self, index: UVec3) -> Vec3 {
        self.space().index_to_normalized(index)
    }

    fn from_normalized_space(&self, normalized: Vec3) -> Vec3 {
        self.space().from_normalized_space(normalized)
    }
}

impl VoxelContainer for VoxelVolume {
    fn resize(&mut self, resolution: UVec3) {
        VoxelVolume::resize(self, resolution);
    }

    fn set_value(&mut self, index: UVec3, value: f32) {
        VoxelVolume::set_value(self, index, value);
    }
}
