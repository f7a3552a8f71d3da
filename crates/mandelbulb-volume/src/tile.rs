//! Tiled storage layout.
//!
//! The voxel index space is cut into cubes of at most [`TILE_SIZE`] voxels per
//! axis. The last tile on each axis holds the remainder, so tiles cover the
//! grid exactly with no overlap. Tiles are numbered x-fastest.

use glam::UVec3;

/// Default tile edge length in voxels.
pub const TILE_SIZE: u32 = 16;

/// Partition of a grid resolution into tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    resolution: UVec3,
    tile_size: u32,
    tile_counts: UVec3,
}

impl TileLayout {
    /// Creates a layout for `resolution`. A `tile_size` of 0 is treated as 1.
    #[must_use]
    pub fn new(resolution: UVec3, tile_size: u32) -> Self {
        let tile_size = tile_size.max(1);
        let tile_counts = UVec3::new(
            resolution.x.div_ceil(tile_size),
            resolution.y.div_ceil(tile_size),
            resolution.z.div_ceil(tile_size),
        );
        Self {
            resolution,
            tile_size,
            tile_counts,
        }
    }

    /// Returns the grid resolution this layout partitions.
    #[must_use]
    pub fn resolution(&self) -> UVec3 {
        self.resolution
    }

    /// Returns the tile edge length.
    #[must_use]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Returns the number of tiles along each axis.
    #[must_use]
    pub fn tile_counts(&self) -> UVec3 {
        self.tile_counts
    }

    /// Returns the total number of tiles.
    #[must_use]
    pub fn num_tiles(&self) -> usize {
        self.tile_counts.x as usize * self.tile_counts.y as usize * self.tile_counts.z as usize
    }

    /// Returns the 3D tile coordinate of a linear tile id.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn tile_coord(&self, id: usize) -> UVec3 {
        let cx = self.tile_counts.x as usize;
        let cy = self.tile_counts.y as usize;
        UVec3::new((id % cx) as u32, ((id / cx) % cy) as u32, (id / (cx * cy)) as u32)
    }

    /// Returns the voxel index of the tile's minimum corner.
    #[must_use]
    pub fn tile_origin(&self, id: usize) -> UVec3 {
        self.tile_coord(id) * self.tile_size
    }

    /// Returns the number of voxels the tile spans on each axis.
    #[must_use]
    pub fn tile_extent(&self, id: usize) -> UVec3 {
        let origin = self.tile_origin(id);
        (self.resolution - origin).min(UVec3::splat(self.tile_size))
    }

    /// Returns the tile id owning `index` and the voxel's offset inside it.
    ///
    /// Returns `None` for indices outside the grid.
    #[must_use]
    pub fn locate(&self, index: UVec3) -> Option<(usize, usize)> {
        if index.cmpge(self.resolution).any() {
            return None;
        }
        let coord = index / self.tile_size;
        let id = coord.x as usize
            + coord.y as usize * self.tile_counts.x as usize
            + coord.z as usize * self.tile_counts.x as usize * self.tile_counts.y as usize;
        let local = index - coord * self.tile_size;
        let extent = self.tile_extent(id);
        let offset = local.x as usize
            + local.y as usize * extent.x as usize
            + local.z as usize * extent.x as usize * extent.y as usize;
        Some((id, offset))
    }
}

/// One tile of voxel values.
///
/// A tile owns its values, so disjoint tiles can be written concurrently
/// through `&mut` borrows.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelTile {
    origin: UVec3,
    extent: UVec3,
    values: Vec<f32>,
}

impl VoxelTile {
    pub(crate) fn new(origin: UVec3, extent: UVec3, background: f32) -> Self {
        let len = extent.x as usize * extent.y as usize * extent.z as usize;
        Self {
            origin,
            extent,
            values: vec![background; len],
        }
    }

    /// Returns the voxel index of the tile's minimum corner.
    #[must_use]
    pub fn origin(&self) -> UVec3 {
        self.origin
    }

    /// Returns the tile size on each axis.
    #[must_use]
    pub fn extent(&self) -> UVec3 {
        self.extent
    }

    /// Returns the number of voxels in the tile.
    #[must_use]
    pub fn num_voxels(&self) -> usize {
        self.values.len()
    }

    /// Returns the tile's values, x-fastest in tile-local order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Iterates over the global voxel indices of the tile in storage order.
    pub fn voxel_indices(&self) -> impl Iterator<Item = UVec3> + '_ {
        let (origin, extent) = (self.origin, self.extent);
        (0..extent.z).flat_map(move |z| {
            (0..extent.y)
                .flat_map(move |y| (0..extent.x).map(move |x| origin + UVec3::new(x, y, z)))
        })
    }

    /// Overwrites every voxel in the tile with `f(global_index)`.
    pub fn fill_with<F>(&mut self, mut f: F)
    where
        F: FnMut(UVec3) -> f32,
    {
        let (origin, extent) = (self.origin, self.extent);
        let mut values = self.values.iter_mut();
        for z in 0..extent.z {
            for y in 0..extent.y {
                for x in 0..extent.x {
                    if let Some(v) = values.next() {
                        *v = f(origin + UVec3::new(x, y, z));
                    }
                }
            }
        }
    }

    pub(crate) fn set(&mut self, offset: usize, value: f32) {
        self.values[offset] = value;
    }

    pub(crate) fn get(&self, offset: usize) -> f32 {
        self.values[offset]
    }
}
